//! Bearer token minting and verification behind one [`Maker`] contract.
//!
//! Six backends share the contract: HS256 and EdDSA JWTs, and PASETO
//! `v2`/`v3` in both `local` (encrypted) and `public` (signed) purposes.
//! Callers pick a backend once, hold it as a `dyn Maker`, and never branch
//! on the concrete type.
//!
//! ```no_run
//! use chrono::TimeDelta;
//! use tokenmaker::{Maker, PasetoV2Local};
//!
//! let maker: Box<dyn Maker> = Box::new(PasetoV2Local::new(
//!     "bc11fab585bca18ad287c5a5c3070153d13f3e8d52a50180a93ca3072f0262a1",
//! )?);
//! let issued = maker.create_token("alice", TimeDelta::hours(1))?;
//! let payload = maker.verify_token(&issued.token)?;
//! assert_eq!(payload.username(), "alice");
//! # Ok::<(), tokenmaker::MakerError>(())
//! ```

pub mod cli;
pub mod config;
mod error;
pub mod jwt;
mod maker;
pub mod paseto;
mod payload;

pub use config::MakerConfig;
pub use error::MakerError;
pub use jwt::{JwtEdDsaMaker, JwtMaker};
pub use maker::{IssuedToken, Maker, Scheme};
pub use paseto::{PasetoV2Local, PasetoV2Public, PasetoV3Local, PasetoV3Public};
pub use payload::Payload;
