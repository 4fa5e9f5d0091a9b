// SPDX-License-Identifier: GPL-3.0-only

//! Ordered collection of captured photos
//!
//! Every removal path releases the removed photo's display handle before it
//! returns, and dropping the collection clears it.

use crate::errors::IndexError;
use crate::pipelines::photo::{CapturedPhoto, DisplayRegistry};
use tracing::{debug, info};

/// Photos in insertion order
#[derive(Debug)]
pub struct CaptureCollection {
    photos: Vec<CapturedPhoto>,
    registry: DisplayRegistry,
}

impl CaptureCollection {
    /// Create an empty collection releasing handles through `registry`
    pub fn new(registry: DisplayRegistry) -> Self {
        Self {
            photos: Vec::new(),
            registry,
        }
    }

    /// Append a photo at the end
    pub fn add(&mut self, photo: CapturedPhoto) {
        debug!(
            sequence_index = photo.sequence_index(),
            position = self.photos.len(),
            "Photo added"
        );
        self.photos.push(photo);
    }

    /// Remove the photo at `index`, keeping the order of the rest
    ///
    /// Out-of-range indices fail without touching the collection.
    pub fn remove_at(&mut self, index: usize) -> Result<(), IndexError> {
        if index >= self.photos.len() {
            return Err(IndexError {
                index,
                len: self.photos.len(),
            });
        }

        let photo = self.photos.remove(index);
        self.registry.revoke(photo.display_handle());
        debug!(index, remaining = self.photos.len(), "Photo removed");
        Ok(())
    }

    /// Remove every photo, releasing all display handles
    pub fn clear(&mut self) {
        if self.photos.is_empty() {
            return;
        }
        let count = self.photos.len();
        for photo in self.photos.drain(..) {
            self.registry.revoke(photo.display_handle());
        }
        info!(count, "Photo collection cleared");
    }

    /// Photos in insertion order
    pub fn list(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn get(&self, index: usize) -> Option<&CapturedPhoto> {
        self.photos.get(index)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl Drop for CaptureCollection {
    fn drop(&mut self) {
        self.clear();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        RemoveAt(usize),
        Clear,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Add),
            2 => (0usize..12).prop_map(Op::RemoveAt),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        /// Any add/remove/clear sequence behaves like a plain vector
        #[test]
        fn collection_matches_vec_model(ops in prop::collection::vec(arb_op(), 0..40)) {
            let registry = DisplayRegistry::new();
            let mut collection = CaptureCollection::new(registry.clone());
            let mut model: Vec<usize> = Vec::new();
            let mut next = 0;

            for op in ops {
                match op {
                    Op::Add => {
                        collection.add(CapturedPhoto::from_bytes(&[0xff, 0xd8], &registry, next));
                        model.push(next);
                        next += 1;
                    }
                    Op::RemoveAt(index) => {
                        let in_range = index < model.len();
                        prop_assert_eq!(collection.remove_at(index).is_ok(), in_range);
                        if in_range {
                            model.remove(index);
                        }
                    }
                    Op::Clear => {
                        collection.clear();
                        model.clear();
                    }
                }

                let order: Vec<usize> =
                    collection.list().iter().map(|p| p.sequence_index()).collect();
                prop_assert_eq!(&order, &model);
                prop_assert_eq!(registry.live_count(), model.len());
            }
        }
    }
}
