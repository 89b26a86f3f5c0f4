//! Swagger/OpenAPI import into gateway-ready API definitions
//!
//! [`Importer::create_api`] runs the whole pipeline:
//!
//! 1. load and parse the description, then lower it with the matching
//!    version adapter (`swagger-import-parser`)
//! 2. resolve backend targets and the virtual host path ([`target`])
//! 3. group operations into paths and rules, attaching generated policies
//!    ([`builder`], `swagger-import-policy`)
//! 4. apply the `x-graviteeio-definition` vendor extension ([`extensions`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use swagger_import_common::{ImportDescriptor, ImporterConfig};
//! use swagger_import_importer::Importer;
//!
//! let importer = Importer::new(&ImporterConfig::default())?;
//! let draft = importer.create_api(
//!     &ImportDescriptor::url("https://petstore3.swagger.io/api/v3/openapi.json")
//!         .with_policies(["mock"])
//!         .with_policy_paths(true),
//! )?;
//! println!("{} {}", draft.name, draft.version);
//! # Ok::<(), swagger_import_common::ImportError>(())
//! ```

pub mod builder;
pub mod extensions;
pub mod groups;
mod importer;
pub mod target;

pub use extensions::{map_extensions, ExtensionFragment};
pub use groups::{GroupLookup, GroupRef, InMemoryGroupLookup};
pub use importer::Importer;
pub use target::{resolve, ResolvedTargets};
