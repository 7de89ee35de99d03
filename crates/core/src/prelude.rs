pub use crate::analyzer::{
    analyze,
    error::{MemberwiseError, MemberwiseResult},
    model::{AccessLevel, TypeDescriptor},
};
pub use crate::synthesizer::{ConstructorPlan, Parameter};
pub use crate::{expand, plan};
