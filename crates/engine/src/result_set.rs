//! The incremental sorted result set and its diff engine.
//!
//! [`SortedResultSet`] owns the ordered, deduplicated view of places currently
//! passing the last-applied query. Each [`SortedResultSet::apply`] evaluates
//! the predicate over a fresh candidate snapshot, re-orders the survivors, and
//! emits a [`DiffBatch`]: the sequence of operations that transforms the
//! previous view into the new one. A list-rendering consumer can replay the
//! batch instead of redrawing from scratch.

use crate::predicate;
use crate::query::Query;
use catalogue::{Place, PlaceId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One step of the transformation from the previous view to the new one.
///
/// Replay contract: ops are applied strictly in batch order. `Remove` is
/// keyed by id. `Insert` positions are valid in the sequence as it stands
/// when the op is reached (all removes done, earlier inserts done). `Move`
/// positions likewise refer to the sequence at that point in the replay.
/// `Changed` marks a surviving id whose title or category differs from the
/// previously stored snapshot; position changes alone never produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    Remove { id: PlaceId },
    Insert { id: PlaceId, position: usize },
    Move { id: PlaceId, from: usize, to: usize },
    Changed { id: PlaceId },
}

/// An atomic batch of diff ops: all removes, then all inserts, then moves,
/// then content changes.
///
/// The batch is the begin/end bracket — a consumer applies the whole sequence
/// as one transaction, so no intermediate inconsistent state is observable
/// between two views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffBatch {
    ops: Vec<DiffOp>,
}

impl DiffBatch {
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Replay this batch against the previous view, producing the new one.
    ///
    /// `new_items` supplies the content for `Insert` and `Changed` ops and is
    /// normally the engine's current view (`SortedResultSet::entries`). Used
    /// by incremental consumers and by the diff-correctness tests. Ops that
    /// do not fit the supplied sequence are skipped or clamped, so replaying
    /// against something other than the matching previous view degrades
    /// instead of panicking.
    pub fn replay(&self, previous: &[Place], new_items: &[Place]) -> Vec<Place> {
        let by_id: HashMap<&str, &Place> =
            new_items.iter().map(|p| (p.id(), p)).collect();

        let mut view: Vec<Place> = previous.to_vec();
        for op in &self.ops {
            match op {
                DiffOp::Remove { id } => {
                    if let Some(at) = view.iter().position(|p| p.id() == id.as_str()) {
                        view.remove(at);
                    }
                }
                DiffOp::Insert { id, position } => {
                    if let Some(item) = by_id.get(id.as_str()) {
                        view.insert((*position).min(view.len()), (*item).clone());
                    }
                }
                DiffOp::Move { from, to, .. } => {
                    if *from < view.len() {
                        let item = view.remove(*from);
                        view.insert((*to).min(view.len()), item);
                    }
                }
                DiffOp::Changed { id } => {
                    if let (Some(at), Some(item)) = (
                        view.iter().position(|p| p.id() == id.as_str()),
                        by_id.get(id.as_str()),
                    ) {
                        view[at] = (*item).clone();
                    }
                }
            }
        }
        view
    }
}

impl<'a> IntoIterator for &'a DiffBatch {
    type Item = &'a DiffOp;
    type IntoIter = std::slice::Iter<'a, DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Ordered, deduplicated view of the places passing the last-applied query.
///
/// Owned exclusively by this instance; callers read it through [`entries`]
/// and mutate it only through [`apply`]. `apply` is synchronous and
/// non-reentrant — the caller serializes re-filter requests.
///
/// [`entries`]: SortedResultSet::entries
/// [`apply`]: SortedResultSet::apply
#[derive(Debug, Default)]
pub struct SortedResultSet {
    entries: Vec<Place>,
    /// Identifier → position in `entries`, for O(log n) lookup.
    index: BTreeMap<PlaceId, usize>,
}

impl SortedResultSet {
    /// An empty view. Populated by the first [`apply`](Self::apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate the query over a fresh candidate snapshot and replace the
    /// view, returning the batch that transforms the old view into the new.
    ///
    /// Candidates are read-only; the engine clones what it keeps. Duplicate
    /// identifiers in the input are dropped after the first occurrence, so
    /// the view never holds the same id twice. Applying the same snapshot and
    /// query twice yields an empty batch the second time.
    pub fn apply(&mut self, candidates: &[Place], query: &Query) -> DiffBatch {
        let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
        let mut matched: Vec<Place> = candidates
            .iter()
            .filter(|place| predicate::matches(place, query) && seen.insert(place.id()))
            .cloned()
            .collect();
        matched.sort_by(|a, b| query.ordering().compare(a, b));

        tracing::debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            "filtered candidate snapshot"
        );

        let batch = diff(&self.entries, &matched);
        tracing::debug!(ops = batch.len(), "computed view diff");

        self.entries = matched;
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, place)| (place.id().to_string(), position))
            .collect();
        batch
    }

    /// The current ordered view, for full-redraw consumers.
    pub fn entries(&self) -> &[Place] {
        &self.entries
    }

    /// Number of places in the current view, for a results-count display.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of a place in the current view, if present.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, position: usize) -> Option<&Place> {
        self.entries.get(position)
    }
}

/// Compute the batch transforming `prev` into `next`.
///
/// Removes and inserts are keyed by identity, so a shifted neighborhood after
/// an insert or remove does not count as movement. Moves come from the
/// residual order: a longest subsequence of ids that already stand in the
/// target order stays put and only the ids outside it move, so the move count
/// is the minimum needed to repair the broken neighbor relationships.
fn diff(prev: &[Place], next: &[Place]) -> DiffBatch {
    let next_ids: HashSet<&str> = next.iter().map(|p| p.id()).collect();
    let prev_by_id: HashMap<&str, &Place> = prev.iter().map(|p| (p.id(), p)).collect();

    let mut ops = Vec::new();

    // Identifiers leaving the view.
    for place in prev {
        if !next_ids.contains(place.id()) {
            ops.push(DiffOp::Remove {
                id: place.id().to_string(),
            });
        }
    }

    // Working sequence: survivors in their previous relative order, with new
    // identifiers spliced in at their target positions. This mirrors what a
    // replaying consumer holds after the removes and inserts.
    let mut working: Vec<&str> = prev
        .iter()
        .map(|p| p.id())
        .filter(|id| next_ids.contains(id))
        .collect();

    for (position, place) in next.iter().enumerate() {
        if !prev_by_id.contains_key(place.id()) {
            working.insert(position, place.id());
            ops.push(DiffOp::Insert {
                id: place.id().to_string(),
                position,
            });
        }
    }

    // Residual reordering: hold a longest run of items whose relative order
    // already matches `next` stationary and move only the rest. When a single
    // item changed rank, every other neighbor relationship is intact and
    // exactly one move comes out.
    let rank_of: HashMap<&str, usize> = next
        .iter()
        .enumerate()
        .map(|(position, p)| (p.id(), position))
        .collect();
    let ranks: Vec<usize> = working.iter().map(|id| rank_of[*id]).collect();
    let stationary: HashSet<usize> =
        longest_increasing_subsequence(&ranks).into_iter().collect();

    // Settle movers in ascending target order: everything ranked below the
    // current mover is already in relative order, so slotting it in right
    // after the last lower-ranked item is final.
    let mut movers: Vec<&str> = working
        .iter()
        .enumerate()
        .filter(|(position, _)| !stationary.contains(position))
        .map(|(_, id)| *id)
        .collect();
    movers.sort_by_key(|id| rank_of[*id]);

    for id in movers {
        let Some(from) = working.iter().position(|w| *w == id) else {
            debug_assert!(false, "id {id} missing from working sequence");
            continue;
        };
        working.remove(from);
        let to = working
            .iter()
            .rposition(|w| rank_of[*w] < rank_of[id])
            .map_or(0, |i| i + 1);
        working.insert(to, id);
        if from != to {
            ops.push(DiffOp::Move {
                id: id.to_string(),
                from,
                to,
            });
        }
    }

    // Content changes on surviving identifiers, independent of movement.
    for place in next {
        if let Some(old) = prev_by_id.get(place.id()) {
            if !old.same_content(place) {
                ops.push(DiffOp::Changed {
                    id: place.id().to_string(),
                });
            }
        }
    }

    DiffBatch { ops }
}

/// Indices of one longest strictly increasing subsequence of `ranks`
/// (patience sorting with parent links, O(n log n)), in ascending order.
fn longest_increasing_subsequence(ranks: &[usize]) -> Vec<usize> {
    // tails[k] holds the index of the smallest tail among increasing
    // subsequences of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; ranks.len()];

    for (i, &rank) in ranks.iter().enumerate() {
        let slot = tails.partition_point(|&t| ranks[t] < rank);
        parent[i] = if slot > 0 { Some(tails[slot - 1]) } else { None };
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut indices = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        indices.push(i);
        cursor = parent[i];
    }
    indices.reverse();
    indices
}
