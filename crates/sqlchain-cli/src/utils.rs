use std::{
    fmt::Display,
    sync::{LazyLock, PoisonError, RwLock},
};

use nu_ansi_term::Color;

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn set_color(enabled: bool) {
    *COLOR.write().unwrap_or_else(PoisonError::into_inner) = enabled;
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = *COLOR.read().unwrap_or_else(PoisonError::into_inner);
        if color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}
