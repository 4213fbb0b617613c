//! Structural name formatting for diagnostics (`"Int"`, `"[Int]"`,
//! `"(Int,Float):Solid"`, `"Int->(Int):Int"`).

use std::fmt;

use super::TypeId;

pub struct DisplayType(pub TypeId);

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::interner::display_name(self.0))
    }
}
