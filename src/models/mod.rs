//! Pre-fitted model artifacts and their capabilities

pub mod classifier;
pub mod encoder;
pub mod inference;
pub mod linear;
pub mod loader;
pub mod scaler;

pub use classifier::Classifier;
pub use encoder::{CategoryEncoder, LabelEncoder};
pub use inference::OnnxClassifier;
pub use linear::LinearClassifier;
pub use loader::{Artifacts, ModelLoader};
pub use scaler::{FeatureScaler, StandardScaler};
