//! Request and view schemas
//!
//! These are the shapes that cross the HTTP boundary. Field names are
//! camelCase on the wire; inputs also accept the snake_case spelling.
//!
//! | Shape | Used by | Fields |
//! |---|---|---|
//! | [`KittenCreate`] | POST | all required |
//! | [`KittenUpdate`] | PUT | all required, all overwritten |
//! | [`KittenPatch`] | PATCH | all optional, only supplied ones applied |
//! | [`KittenView`] | responses | id plus nested [`BreedView`] |

pub mod breed;
pub mod kitten;
pub mod patch;

pub use breed::BreedView;
pub use kitten::{KittenCreate, KittenUpdate, KittenPatch, KittenView};
pub use patch::Patch;
