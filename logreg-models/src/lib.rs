pub mod config;
pub mod logistic_regression;
pub mod observer;

pub use config::TrainConfig;
pub use logistic_regression::LogisticRegression;
pub use observer::{LogProgress, Silent, TrainingObserver};
