//! Authentication: the stored credential, the 401 gate, and login/logout.
//!
//! The credential lives in an explicit [`CredentialStore`] created at startup.
//! The HTTP client reads it through the [`AuthGate`] on every request, and the
//! gate clears it whenever the backend answers 401.

pub mod credentials;
pub mod gate;
pub mod session;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use gate::AuthGate;
pub use session::{SessionService, SessionStatus};
