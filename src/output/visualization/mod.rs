//! Visualization of simulation results using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **profile**: Spatial plots (temperature vs position)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use heateq::output::visualization::{plot_profile, PlotConfig};
//!
//! let result = solver.run();
//!
//! // Final profile with the default config
//! plot_profile(&result, "profile.png", None)?;
//!
//! // Or with a custom title
//! let config = PlotConfig::profile("Rod after 2 s");
//! plot_profile(&result, "profile.svg", Some(&config))?;
//! ```
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Final profile of one run | `plot_profile` |
//! | Snapshots or runs overlaid | `plot_profiles` |

pub mod config;
pub mod profile;

pub use config::{PlotConfig, NO_TITLE};
pub use profile::{plot_profile, plot_profiles, Profile};
