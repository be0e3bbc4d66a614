//! # Starkscan Contract Verifier
//!
//! A Rust library for verifying Starknet smart contracts on the Starkscan
//! block explorer. Given a contract's entry source file, it collects the
//! full transitive import closure across a prioritized set of search
//! directories, packages the sources into a single bundle, and submits
//! that bundle to the remote verification service.
//!
//! ## Features
//!
//! - **Import Resolution**: Recursive, memoized traversal of `from .. import`
//!   statements across multi-root search paths
//! - **Contract Verification**: Submit source bundles and poll for results
//! - **Multi-network Support**: Mainnet, testnet and custom API endpoints
//! - **Type Safety**: Strong typing for class hashes and job statuses
//! - **Error Handling**: Error types with actionable suggestions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use verifier::{api::ApiClient, class_hash::ClassHash};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(
//!     Url::parse("https://api.starkscan.co/api")?,
//!     Url::parse("https://starkscan.co")?,
//! )?;
//!
//! let class_hash = ClassHash::new("0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18")?;
//!
//! let verifiable = client.is_hash_verifiable(&class_hash)?;
//! println!("Class is verifiable: {verifiable}");
//! # Ok(())
//! # }
//! ```

/// API client and types for interacting with the verification service
pub mod api;

/// Type-safe class hash handling and validation
pub mod class_hash;

/// Shared error types for HTTP request diagnostics
pub mod errors;

/// Terminal progress indicators
pub mod progress;

/// Import-dependency resolution and source bundle assembly
pub mod resolver;

/// Import search path assembly and normalization
pub mod search_path;
