// vim: tw=80
//! Default values for unconfigured calls and unconfigured properties.

use std::any::TypeId;

use crate::descriptor::TypeDesc;
use crate::value::{value, Value};

/// External collaborator that manufactures placeholder values.
///
/// Consulted for the return value of an unmatched call and for the first
/// get of an unconfigured property.  A `None` never propagates as an error:
/// it degrades to the built-in zero value, or to no value at all.
pub trait DummyFactory: Send + Sync {
    fn produce(&self, ty: TypeDesc) -> Option<Value>;
}

/// Zero values for primitive and standard types, used when no dummy factory
/// is registered or the factory comes up empty.
pub(crate) fn zero_value(ty: TypeDesc) -> Option<Value> {
    macro_rules! zeros {
        ($($t:ty => $z:expr),+ $(,)?) => {
            $(
                if ty.id() == TypeId::of::<$t>() {
                    return Some(value::<$t>($z));
                }
            )+
        }
    }
    zeros! {
        bool => false,
        i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
        u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
        f32 => 0.0, f64 => 0.0,
        char => '\0',
        String => String::new(),
        &'static str => "",
        () => (),
    }
    None
}
