pub mod error;
pub mod format;
pub mod interactive;
pub mod output;

pub use error::{AppError, AppResult, FlowResult, handle_flow, report_error};
pub use interactive::prompt_yes_no;
pub use output::{DisplayFormatter, OutputStyle, print_success, print_warning};
