mod effects;
mod reducer;

pub use effects::{CoreEffect, CoreEffects, PrefWrite, WriteOutcome};
pub use reducer::spawn_app_actor;
