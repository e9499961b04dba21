// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dates;
pub mod delete;
pub mod errors;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod listing;
pub mod modal;
pub mod model;
pub mod state;

pub use delete::*;
pub use errors::*;
pub use filter::*;
pub use forms::*;
pub use ids::*;
pub use listing::*;
pub use modal::*;
pub use model::*;
pub use state::*;
