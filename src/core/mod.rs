/*
* Server assembly and logging setup.
*/

pub mod logging;
pub mod server;
