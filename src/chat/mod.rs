pub mod canonicalize;
pub mod completion;
pub mod prompt;
pub mod service;
pub mod turn;

pub use canonicalize::{canonicalize_phone_numbers, PhoneCanonicalizer};
pub use completion::{CompletionError, CompletionFunction, CompletionOptions, OpenAiCompletion};
pub use prompt::{HoursSnapshot, PromptBuilder, Snippets};
pub use service::{ChatError, ChatReply, ChatService};
pub use turn::{ChatTurn, Role};
