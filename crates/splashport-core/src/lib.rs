// splashport-core: wizard state machine, splash-record model, and CSV
// export for the Meraki captive-portal exporter.

pub mod error;
pub mod export;
pub mod model;
pub mod wizard;

pub use error::{Stage, WizardError};
pub use export::CsvExport;
pub use model::SplashInfo;
pub use wizard::{Wizard, WizardConfig, WizardState};
