// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod loading;
pub mod model;
pub mod pagination;
pub mod session;
pub mod state;
pub mod table;
pub mod tabs;

pub use ids::*;
pub use loading::*;
pub use model::*;
pub use pagination::*;
pub use session::*;
pub use state::*;
pub use table::*;
pub use tabs::*;
