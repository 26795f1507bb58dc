//! Protogen Face - A protogen face whose mouth follows the wearer's voice.
//!
//! The app renders eyes, cheeks and a mouth that opens with the attached
//! proportion sensor, and serves a small web surface:
//!
//! - `GET /home`, `GET /hello`, `GET /hello/website`
//! - the attribute routes from [`protogen_app::attribute_endpoints`]
//! - static files under the manifest's static path when self-hosted
//!
//! # Example
//!
//! ```no_run
//! use protogen_config::Config;
//! use protogen_core::{RecordingCanvas, Resolution};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let mut app = protogen_face::create_app(&config)?;
//!
//! app.set_resources_directory("/opt/protogen/face".as_ref())?;
//! app.set_user_data_directory("/var/lib/protogen/face".as_ref())?;
//! app.set_device_resolution(Resolution::new(128, 32))?;
//! app.sanity_check()?;
//! app.initialize()?;
//!
//! let mut canvas = RecordingCanvas::new(Resolution::new(128, 32));
//! app.render(&mut canvas);
//!
//! protogen_face::destroy_app(app);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod bridge;
pub mod pages;

mod face;

pub use face::{FaceApp, create_app, destroy_app};
pub use pages::page_endpoints;
