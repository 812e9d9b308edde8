/// Fit pipeline: file name classification, collection, `plfit` invocation.
pub mod collect;
pub mod errors;
pub mod invoke;
pub mod kv;
pub mod name;
pub mod record;
pub mod runner;

pub use collect::collect;
pub use errors::FitError;
pub use invoke::FitInvoker;
pub use name::FileNamePattern;
pub use record::Record;
pub use runner::{ProcessRunner, SystemRunner};
