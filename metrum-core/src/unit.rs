//! Unit trait.

use core::fmt::Debug;
use core::hash::Hash;

/// Trait implemented by every **unit** enum.
///
/// A unit is one value of an enum scoped to a single [`crate::Dimension`]. Because each dimension has its own
/// unit type, a unit of one dimension can never be passed where another dimension's unit is expected.
///
/// Implementations are normally generated by `#[derive(Unit)]`, which emits exhaustive `match`es over the
/// variants.
///
/// # Invariants
///
/// - `ALL` lists every variant exactly once, in declaration order.
/// - `name` is unique within the enum and is the key used by abbreviation data sources.
pub trait Unit: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every unit of the dimension.
    const ALL: &'static [Self];

    /// Singular name, e.g. `"RevolutionPerMinute"`.
    fn name(self) -> &'static str;

    /// Plural name, e.g. `"RevolutionsPerMinute"`.
    fn plural_name(self) -> &'static str;

    /// Invariant-locale abbreviations compiled into the crate, preferred one first.
    ///
    /// May be empty; the abbreviation cache then relies on its data source alone.
    fn abbreviations(self) -> &'static [&'static str];

    /// Looks a unit up by its singular name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|unit| unit.name() == name)
    }
}
