//! The Invocation Driver, Network List Manager, and Message Executors
//! (§4.4–§4.6): the synchronous core that turns one decoded `Call` into a
//! committed (or rolled back) set of entity mutations plus an audit trail.

mod call_source;
mod driver;
mod executor;
mod logger;
pub mod message_executors;
pub mod metrics;
pub mod network_list;
pub mod round_trip;

pub use call_source::{Call, CallSource};
pub use driver::InvocationDriver;
pub use executor::{ExecutionContext, ExecutorOutcome, MessageExecutor, NetworkIdScheme};
pub use logger::{Logger, TracingLogger};
pub use round_trip::encode_message_body;
