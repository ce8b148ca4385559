pub mod motion_intent;

pub use motion_intent::MotionIntentController;
