pub mod convert;
pub mod init;
pub mod value;

pub use convert::{convert, ConvertArgs};
pub use init::{init, InitArgs};
pub use value::{value, ValueArgs};
