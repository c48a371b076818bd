mod agent_event;
pub use agent_event::*;

mod execution_log;
pub use execution_log::*;

mod integration;
pub use integration::*;

mod message;
pub use message::*;

mod run_result;
pub use run_result::*;

mod token_usage;
pub use token_usage::*;

mod tool_call;
pub use tool_call::*;

mod tool_result;
pub use tool_result::*;
