// Route handlers, one module per resource. Two auth tiers: public routes and
// bearer-token routes (see routes.rs for which is which).

pub mod assignments;
pub mod bookmarks;
pub mod reviews;
pub mod stats;
pub mod submissions;
