//! Ordered offer collections.
//!
//! Offers are kept in insertion order and looked up by their shop SKU. A
//! lookup records the collection's [`CollectionId`] on the offer it finds,
//! which is what later lets that offer ask to be removed.

use crate::error::Result;
use crate::offer::Offer;
use crate::tree::Element;
use crate::value::{AttributeMap, Value};
use log::{debug, trace, warn};
use std::fmt::Display;
use std::ops::{Deref, DerefMut, Index};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an [`OfferCollection`], recorded on offers it has found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(u64);

impl CollectionId {
    fn next() -> Self {
        CollectionId(NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One offer or a batch of offers for [`OfferCollection::add`].
pub trait IntoOffers {
    /// Converts into offers in call order.
    fn into_offers(self) -> Vec<Offer>;
}

impl IntoOffers for Offer {
    fn into_offers(self) -> Vec<Offer> {
        vec![self]
    }
}

impl IntoOffers for Vec<Offer> {
    fn into_offers(self) -> Vec<Offer> {
        self
    }
}

impl<const N: usize> IntoOffers for [Offer; N] {
    fn into_offers(self) -> Vec<Offer> {
        self.into_iter().collect()
    }
}

/// An insertion-ordered store of offers.
#[derive(Debug)]
pub struct OfferCollection {
    id: CollectionId,
    offers: Vec<Offer>,
}

impl Default for OfferCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Offer>> for OfferCollection {
    fn from(offers: Vec<Offer>) -> Self {
        Self {
            id: CollectionId::next(),
            offers,
        }
    }
}

impl OfferCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// This collection's identity.
    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// Number of offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Number of offers.
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Whether the collection holds no offers.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// The offer at `index`.
    pub fn get(&self, index: usize) -> Option<&Offer> {
        self.offers.get(index)
    }

    /// Iterates offers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Offer> {
        self.offers.iter()
    }

    /// Appends one or many offers. Duplicates are not detected.
    pub fn add<O: IntoOffers>(&mut self, offers: O) -> &mut Self {
        let offers = offers.into_offers();
        trace!("adding {} offer(s) to collection {:?}", offers.len(), self.id);
        self.offers.extend(offers);
        self
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.offers
            .iter()
            .position(|offer| offer.shop_sku().as_deref() == Some(key))
    }

    /// Finds the first offer whose shop SKU matches `key`.
    ///
    /// The found offer remembers this collection as its parent.
    pub fn find(&mut self, key: impl Display) -> Option<FoundOffer<'_>> {
        let key = key.to_string();
        let index = self.position(&key)?;
        trace!("found offer {} at index {}", key, index);
        let id = self.id;
        self.offers[index].set_parent(id);
        Some(FoundOffer {
            collection: self,
            index,
        })
    }

    /// Copies the matching offer's exported attributes into a new offer.
    ///
    /// The copy is not added to any collection and has no parent.
    pub fn clone_offer(&mut self, key: impl Display) -> Option<Offer> {
        let found = self.find(key)?;
        debug!("cloning offer at index {}", found.index());
        Some(Offer::default().fill(found.to_array()))
    }

    /// Removes the first offer whose shop SKU matches `key`.
    pub fn delete(&mut self, key: impl Display) -> Option<Offer> {
        let key = key.to_string();
        let index = self.position(&key)?;
        debug!("deleting offer {} from collection {:?}", key, self.id);
        Some(self.offers.remove(index))
    }

    /// Removes `offer` by its shop SKU if it was found in this collection.
    ///
    /// Does nothing for offers without a parent, with another parent, or
    /// without a shop SKU.
    pub fn delete_offer(&mut self, offer: &Offer) -> Option<Offer> {
        let key = self.deletion_key(offer)?;
        self.delete(key)
    }

    fn deletion_key(&self, offer: &Offer) -> Option<String> {
        if offer.parent() != Some(self.id) {
            return None;
        }
        offer.shop_sku().map(|sku| sku.into_owned())
    }

    /// Removes every offer.
    pub fn purge(&mut self) {
        debug!("purging {} offer(s) from collection {:?}", self.offers.len(), self.id);
        self.offers.clear();
    }

    /// `{ Offers: [...] }` with each offer's filtered attribute map.
    pub fn to_array(&self) -> AttributeMap {
        let offers = self
            .offers
            .iter()
            .map(|offer| Value::Map(offer.to_array()))
            .collect();
        let mut map = AttributeMap::new();
        map.insert("Offers".to_string(), Value::List(offers));
        map
    }

    /// The array export encoded as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let array = self.to_array();
        let json = if pretty {
            serde_json::to_string_pretty(&array)?
        } else {
            serde_json::to_string(&array)?
        };
        Ok(json)
    }

    /// Builds the `<Offers>` element tree.
    ///
    /// Every offer is validated; the first invalid one aborts the export.
    pub fn to_xml(&self) -> Result<Element> {
        debug!("exporting {} offer(s) as XML", self.offers.len());
        let mut root = Element::new("Offers");
        for (index, offer) in self.offers.iter().enumerate() {
            let mut node = Element::new("Offer");
            if let Err(e) = offer.to_xml_node(&mut node) {
                warn!("XML export aborted at offer {}: {}", index, e);
                return Err(e);
            }
            root.append(node);
        }
        Ok(root)
    }
}

impl Index<usize> for OfferCollection {
    type Output = Offer;

    fn index(&self, index: usize) -> &Offer {
        &self.offers[index]
    }
}

impl<'a> IntoIterator for &'a OfferCollection {
    type Item = &'a Offer;
    type IntoIter = std::slice::Iter<'a, Offer>;

    fn into_iter(self) -> Self::IntoIter {
        self.offers.iter()
    }
}

/// An offer found in a collection by [`OfferCollection::find`].
///
/// Dereferences to the offer and can remove it from the collection.
pub struct FoundOffer<'a> {
    collection: &'a mut OfferCollection,
    index: usize,
}

impl<'a> FoundOffer<'a> {
    /// Position of the offer in its collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Releases the collection borrow, keeping the offer.
    pub fn into_mut(self) -> &'a mut Offer {
        let FoundOffer { collection, index } = self;
        &mut collection.offers[index]
    }

    /// Removes the offer from the collection it was found in.
    ///
    /// Removal goes through the offer's shop SKU, so the first offer with that
    /// SKU is the one removed.
    pub fn delete(self) -> Option<Offer> {
        let key = self
            .collection
            .deletion_key(&self.collection.offers[self.index])?;
        self.collection.delete(key)
    }
}

impl Deref for FoundOffer<'_> {
    type Target = Offer;

    fn deref(&self) -> &Offer {
        &self.collection.offers[self.index]
    }
}

impl DerefMut for FoundOffer<'_> {
    fn deref_mut(&mut self) -> &mut Offer {
        &mut self.collection.offers[self.index]
    }
}
