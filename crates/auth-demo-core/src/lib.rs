// auth-demo-core — the configuration contract every auth-demo crate builds on.
//
// Options, the plugin trait, environment loading, errors, and the small
// policies (trusted origins, account linking) encoded in the configuration.

pub mod email;
pub mod env;
pub mod error;
pub mod linking;
pub mod models;
pub mod options;
pub mod plugin;
pub mod utils;

// Re-exports for convenience
pub use email::{EmailBody, EmailMessage, EmailSender, MemoryEmailSender, SendReceipt};
pub use env::{AuthEnv, EnvMode, OAuthCredentials};
pub use error::{ApiError, AuthError, EmailError, ErrorCode, HttpStatus, Result};
pub use linking::AccountLinkingOptions;
pub use models::{Account, InvitationEmailData, Organization, Session, SessionWithUser, User};
pub use options::AuthOptions;
pub use plugin::AuthPlugin;
