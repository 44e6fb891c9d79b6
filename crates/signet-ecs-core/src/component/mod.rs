mod list;
mod manager;

pub use list::{ComponentList, ComponentStore};
pub use manager::ComponentManager;

///
/// Plain data that can be associated with an entity. Use
/// `#[derive(Component)]` for your own types.
///
pub trait Component: 'static {}

macro_rules! impl_component {
    ($($t:ty),*) => {
        $(impl Component for $t {})*
    }
}

impl_component!(
    bool, char, String,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64
);
