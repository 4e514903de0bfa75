pub mod connection;
pub mod decoders;
pub mod flow_control;
pub mod loader;
pub mod pipeline;
pub mod processor;
pub mod state;
pub mod updater;

pub use connection::MetaConnection;
pub use flow_control::{flow_control_chain, FlowToken};
pub use loader::{load_accounts, BulkLoader, LoadOptions};
pub use pipeline::{run_pipeline, PipelineOptions};
pub use processor::AccountProcessor;
pub use state::{MetaState, StateMutation};
pub use updater::IncrementalUpdater;
