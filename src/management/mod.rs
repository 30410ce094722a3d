mod flow;
mod session;

pub use flow::AuthError;
pub use flow::AuthFlow;
pub use flow::FlowState;
pub use flow::SharedFlow;
pub use flow::TokenExchange;
pub use session::Session;
pub use session::SessionError;
pub use session::SessionStore;
