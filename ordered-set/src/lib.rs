use std::{borrow::Borrow, cmp::Ordering, fmt, iter::FusedIterator};

/// Height-balanced (AVL) ordered set.
///
/// Every lookup and mutation is driven by a probe closure `cmp` that returns the
/// ordering of the probe relative to the stored element it is given. The `Ord`
/// based methods are thin wrappers around the `*_by` ones.
#[derive(Clone)]
pub struct OrderedSet<T> {
    root: Link<T>,
    len: usize,
}

type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: u8,
}

fn height<T>(link: &Link<T>) -> u8 {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn update(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    fn balance_factor(&self) -> i16 {
        height(&self.left) as i16 - height(&self.right) as i16
    }

    // 左回転
    fn rotl(&mut self) {
        let Some(mut right) = self.right.take() else {
            return;
        };
        self.right = right.left.take();
        std::mem::swap(self, &mut *right);
        right.update();
        self.left = Some(right);
        self.update();
    }

    // 右回転
    fn rotr(&mut self) {
        let Some(mut left) = self.left.take() else {
            return;
        };
        self.left = left.right.take();
        std::mem::swap(self, &mut *left);
        left.update();
        self.right = Some(left);
        self.update();
    }

    /// children must already be balanced and differ in height by at most 2
    fn rebalance(&mut self) {
        self.update();
        let balance = self.balance_factor();
        if balance > 1 {
            if let Some(left) = self.left.as_mut() {
                if left.balance_factor() < 0 {
                    left.rotl();
                }
            }
            self.rotr();
        } else if balance < -1 {
            if let Some(right) = self.right.as_mut() {
                if right.balance_factor() > 0 {
                    right.rotr();
                }
            }
            self.rotl();
        }
    }

    /// `cmp(new, existing)`
    fn insert_rec<F>(this: &mut Link<T>, value: T, cmp: &mut F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match this {
            None => {
                *this = Some(Node::new(value));
                true
            }
            Some(node) => {
                let inserted = match cmp(&value, &node.value) {
                    Ordering::Less => Self::insert_rec(&mut node.left, value, cmp),
                    Ordering::Greater => Self::insert_rec(&mut node.right, value, cmp),
                    Ordering::Equal => false,
                };
                if inserted {
                    node.rebalance();
                }
                inserted
            }
        }
    }

    fn remove_rec<F>(this: &mut Link<T>, cmp: &mut F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let ordering = cmp(&this.as_ref()?.value);
        if ordering == Ordering::Equal {
            return Self::unlink(this);
        }
        let node = this.as_mut()?;
        let removed = if ordering == Ordering::Less {
            Self::remove_rec(&mut node.left, cmp)?
        } else {
            Self::remove_rec(&mut node.right, cmp)?
        };
        node.rebalance();
        Some(removed)
    }

    /// Detaches the root of `this`, replacing it with its in-order successor.
    fn unlink(this: &mut Link<T>) -> Option<T> {
        let mut node = this.take()?;
        *this = match (node.left.take(), node.right.take()) {
            (left, None) => left,
            (None, right) => right,
            (left, mut right) => {
                let mut successor = Self::remove_min(&mut right)?;
                successor.left = left;
                successor.right = right;
                successor.rebalance();
                Some(successor)
            }
        };
        Some(node.value)
    }

    fn remove_min(this: &mut Link<T>) -> Option<Box<Self>> {
        let node = this.as_mut()?;
        if node.left.is_some() {
            let min = Self::remove_min(&mut node.left);
            node.rebalance();
            min
        } else {
            let mut min = this.take()?;
            *this = min.right.take();
            Some(min)
        }
    }
}

impl<T> OrderedSet<T> {
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Inserts `value` at the position described by `cmp`.
    /// Returns `false` (dropping `value`) when `cmp` reports `Equal` for some element.
    pub fn insert_by<F>(&mut self, value: T, mut cmp: F) -> bool
    where
        F: FnMut(&T) -> Ordering,
    {
        self.insert_with(value, &mut |_: &T, existing: &T| cmp(existing))
    }

    fn insert_with<F>(&mut self, value: T, cmp: &mut F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let inserted = Node::insert_rec(&mut self.root, value, cmp);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn remove_by<F>(&mut self, mut cmp: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let removed = Node::remove_rec(&mut self.root, &mut cmp);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn get_by<F>(&self, mut cmp: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = &self.root;
        while let Some(node) = current {
            match cmp(&node.value) {
                Ordering::Less => current = &node.left,
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current = &node.right,
            }
        }
        None
    }

    /// Greatest element strictly less than the probe.
    pub fn prev_by<F>(&self, mut cmp: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = &self.root;
        let mut found = None;
        while let Some(node) = current {
            if cmp(&node.value) == Ordering::Greater {
                found = Some(&node.value);
                current = &node.right;
            } else {
                current = &node.left;
            }
        }
        found
    }

    /// Least element strictly greater than the probe.
    pub fn next_by<F>(&self, mut cmp: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = &self.root;
        let mut found = None;
        while let Some(node) = current {
            if cmp(&node.value) == Ordering::Less {
                found = Some(&node.value);
                current = &node.left;
            } else {
                current = &node.right;
            }
        }
        found
    }
}

impl<T: Ord> OrderedSet<T> {
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_with(value, &mut T::cmp)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.remove_by(|x| key.cmp(x.borrow()))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.get_by(|x| key.cmp(x.borrow()))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.get(key).is_some()
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator. Both ends keep their own spine stack; `remaining` stops
/// them from crossing.
pub struct Iter<'a, T> {
    front: Vec<&'a Node<T>>,
    back: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>, len: usize) -> Self {
        let mut iter = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        iter.push_left(root.as_deref());
        iter.push_right(root.as_deref());
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.front.push(n);
            node = n.left.as_deref();
        }
    }

    fn push_right(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.back.push(n);
            node = n.right.as_deref();
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_right(node.left.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
