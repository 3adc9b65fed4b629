use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};

use fnv::FnvBuildHasher;
use hashbrown::HashSet as FnvHashSet;

// ==================================================================================
// 1. The Interoperability Trait
// ==================================================================================

/// A trait for any collection that supports efficient containment checks.
///
/// This allows `Set` to perform set operations (like `difference` or `is_subset`)
/// against standard library sets (`HashSet`, `BTreeSet`) without converting them first.
pub trait AnySet<T> {
    /// Returns `true` if the collection contains the value.
    fn contains(&self, value: &T) -> bool;
}

impl<T> AnySet<T> for Set<T>
where
    T: Eq + Hash,
{
    fn contains(&self, value: &T) -> bool {
        Set::contains(self, value)
    }
}

impl<T, S> AnySet<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains(&self, value: &T) -> bool {
        self.contains(value)
    }
}

impl<T> AnySet<T> for BTreeSet<T>
where
    T: Ord,
{
    fn contains(&self, value: &T) -> bool {
        self.contains(value)
    }
}

// ==================================================================================
// 2. Set Implementation
// ==================================================================================

/// An unordered collection of unique values.
///
/// A thin wrapper around `hashbrown::HashSet` with the FNV hasher, which is fast for
/// the small integer and string keys these sets usually hold. Set algebra
/// (`union`, `intersection`, `difference`) returns a new set and leaves both
/// operands untouched.
pub struct Set<T> {
    inner: FnvHashSet<T, FnvBuildHasher>,
}

impl<T> Set<T>
where
    T: Eq + Hash,
{
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            inner: FnvHashSet::with_hasher(FnvBuildHasher::default()),
        }
    }

    /// Creates a set holding the unique values of `values`.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        values.into_iter().collect()
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Alias for [`len`](Set::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clears the set, removing all values. Keeps the allocated memory for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was newly inserted, `false` if it was already present.
    pub fn add(&mut self, value: T) -> bool {
        self.inner.insert(value)
    }

    /// Returns `true` if the set contains a value.
    ///
    /// Generic over `Q` so `String` sets can be queried with `&str`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(value)
    }

    /// Removes a value from the set. Returns `true` if the value was present.
    ///
    /// Removing a value that is not in the set is a no-op.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(value)
    }

    /// Retains only the elements specified by the predicate.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.inner.retain(f);
    }

    /// Returns an iterator visiting all elements in arbitrary order.
    pub fn iter(&self) -> hashbrown::hash_set::Iter<'_, T> {
        self.inner.iter()
    }

    /// Returns the elements in arbitrary order. An empty set yields an empty `Vec`.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.iter().cloned().collect()
    }

    /// Returns the elements in ascending order.
    pub fn sorted_values(&self) -> Vec<T>
    where
        T: Clone + Ord,
    {
        let mut values = self.values();
        values.sort_unstable();
        values
    }

    // --- Set Operations ---

    /// Returns a new set with every value in `self` or `other`.
    pub fn union(&self, other: &Set<T>) -> Set<T>
    where
        T: Clone,
    {
        let mut result = self.clone();
        result.extend(other.iter().cloned());
        result
    }

    /// Returns a new set with the values in both `self` and `other`.
    ///
    /// `other` can be any collection implementing `AnySet` (`Set`, `HashSet`, `BTreeSet`).
    pub fn intersection<S>(&self, other: &S) -> Set<T>
    where
        T: Clone,
        S: AnySet<T>,
    {
        self.iter().filter(|v| other.contains(v)).cloned().collect()
    }

    /// Returns a new set with the values in `self` that are not in `other`.
    pub fn difference<S>(&self, other: &S) -> Set<T>
    where
        T: Clone,
        S: AnySet<T>,
    {
        self.iter().filter(|v| !other.contains(v)).cloned().collect()
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    pub fn is_disjoint<S>(&self, other: &S) -> bool
    where
        S: AnySet<T>,
    {
        self.iter().all(|v| !other.contains(v))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset<S>(&self, other: &S) -> bool
    where
        S: AnySet<T>,
    {
        self.iter().all(|v| other.contains(v))
    }
}

// ==================================================================================
// 3. Trait Implementations
// ==================================================================================

impl<T: Eq + Hash> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Debug> Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.iter()).finish()
    }
}

impl<T: Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl<T: Eq + Hash> Eq for Set<T> {}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = hashbrown::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = hashbrown::hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

// ==================================================================================
// 4. Tests
// ==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks contents through `values`, `size` and `sorted_values` at once.
    fn assert_values<T>(set: &Set<T>, expected: &[T])
    where
        T: Eq + Hash + Clone + Ord + Debug,
    {
        let mut expected = expected.to_vec();
        expected.sort();
        let mut values = set.values();
        values.sort();
        assert_eq!(values, expected);
        assert_eq!(set.size(), expected.len());
        assert_eq!(set.sorted_values(), expected);
    }

    // --- 1. Construction & Size ---
    #[test]
    fn test_empty() {
        let set: Set<i32> = Set::new();
        assert_values(&set, &[]);
        assert!(set.values().is_empty());
    }

    #[test]
    fn test_initial_values() {
        let set = Set::from_values([1, 2, 3]);
        assert_values(&set, &[1, 2, 3]);
    }

    #[test]
    fn test_size_counts_unique() {
        let set = Set::from_values(["foo", "foo", "bar"]);
        assert_eq!(set.size(), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_is_empty() {
        let mut set = Set::from_values([1]);
        assert!(!set.is_empty());
        set.remove(&1);
        assert!(set.is_empty());
    }

    // --- 2. Basic CRUD ---
    #[test]
    fn test_add_duplicates() {
        let mut set = Set::new();
        assert!(set.add(1));
        assert!(!set.add(1));
        assert!(set.add(2));
        assert_values(&set, &[1, 2]);
    }

    #[test]
    fn test_remove() {
        let mut set = Set::from_values([1, 2]);
        assert!(set.remove(&1));
        assert_values(&set, &[2]);
    }

    #[test]
    fn test_remove_non_existent() {
        let mut set: Set<i32> = Set::new();
        assert!(!set.remove(&1));
        assert_values(&set, &[]);
    }

    #[test]
    fn test_contains_borrowed() {
        let set = Set::from_values(["foo".to_string(), "bar".to_string()]);
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
        assert!(!set.contains("baz"));
    }

    // --- 3. Set Algebra ---
    #[test]
    fn test_union() {
        let s1 = Set::from_values([1, 2]);
        let s2 = Set::from_values([1, 3, 4]);
        assert_values(&s1.union(&s2), &[1, 2, 3, 4]);
        assert_values(&s2.union(&s1), &[1, 2, 3, 4]);
        // Operands are untouched.
        assert_values(&s1, &[1, 2]);
    }

    #[test]
    fn test_intersection() {
        let s1 = Set::from_values([1, 2]);
        let s2 = Set::from_values([1, 3, 4]);
        assert_values(&s1.intersection(&s2), &[1]);
        assert_values(&s2.intersection(&s1), &[1]);
    }

    #[test]
    fn test_difference() {
        let s1 = Set::from_values(["foo", "bar"]);
        let s2 = Set::from_values(["foo", "baz", "bang"]);
        assert_values(&s1.difference(&s2), &["bar"]);
        assert_values(&s2.difference(&s1), &["bang", "baz"]);
    }

    // --- 4. Boolean Logic ---
    #[test]
    fn test_is_disjoint_and_subset() {
        let a = Set::from_values([1, 2]);
        let b = Set::from_values([3, 4]);
        let sup = Set::from_values([1, 2, 3]);
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&sup));
        assert!(a.is_subset(&sup));
        assert!(!sup.is_subset(&a));
        assert!(Set::<i32>::new().is_subset(&a));
    }

    // --- 5. Interoperability (Std Sets) ---
    #[test]
    fn test_interop_std_sets() {
        let set = Set::from_values([1, 2]);
        let std_set: HashSet<i32> = [1, 2, 3].into_iter().collect();
        let btree: BTreeSet<i32> = [2, 3].into_iter().collect();

        assert!(set.is_subset(&std_set));
        assert!(set.difference(&std_set).is_empty());
        assert_eq!(set.intersection(&btree).sorted_values(), vec![2]);
    }

    // --- 6. Iterators & Traits ---
    #[test]
    fn test_iterators_and_retain() {
        let mut set: Set<i32> = (1..=5).collect();
        set.retain(|x| x % 2 == 0);
        let mut seen: Vec<i32> = set.iter().copied().collect();
        seen.sort();
        assert_eq!(seen, vec![2, 4]);

        let mut owned: Vec<i32> = set.clone().into_iter().collect();
        owned.sort();
        assert_eq!(owned, vec![2, 4]);
        assert_eq!(set, Set::from_values([4, 2]));
        assert_eq!(format!("{:?}", Set::from_values([7])), "{7}");
    }
}
