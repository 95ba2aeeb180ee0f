//! The feed builder.
//!
//! A [`Feed`] owns the offer collection and turns it into the three output
//! shapes: a nested attribute map, JSON, and an XML document.

use crate::collection::OfferCollection;
use crate::error::Result;
use crate::value::AttributeMap;
use crate::writer::XmlOptions;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A price-comparison feed.
#[derive(Debug, Default)]
pub struct Feed {
    offers: OfferCollection,
}

impl Feed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The feed's offers.
    pub fn offers(&self) -> &OfferCollection {
        &self.offers
    }

    /// The feed's offers, mutably.
    pub fn offers_mut(&mut self) -> &mut OfferCollection {
        &mut self.offers
    }

    /// `{ Offers: [...] }`. Never validates.
    pub fn to_array(&self) -> AttributeMap {
        self.offers.to_array()
    }

    /// The array export as JSON. Never validates.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        self.offers.to_json(pretty)
    }

    /// The feed as a compact XML document.
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&XmlOptions::default())
    }

    /// The feed as an XML document with the given options.
    pub fn to_xml_with(&self, options: &XmlOptions) -> Result<String> {
        Ok(self.offers.to_xml()?.to_xml_string(options)?)
    }

    /// Writes the XML document to `out`.
    ///
    /// Validation happens before anything is written, so an invalid offer
    /// leaves `out` untouched.
    pub fn write_xml<W: Write>(&self, out: W, options: &XmlOptions) -> Result<W> {
        let root = self.offers.to_xml()?;
        Ok(root.write_document(out, options)?)
    }

    /// Saves the XML document to `path`.
    pub fn save_xml<P: AsRef<Path>>(&self, path: P, options: &XmlOptions) -> Result<()> {
        let root = self.offers.to_xml()?;
        let path = path.as_ref();
        debug!("saving XML feed to {}", path.display());
        let file = BufWriter::new(File::create(path)?);
        root.write_document(file, options)?;
        Ok(())
    }

    /// Saves the JSON export to `path`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        let path = path.as_ref();
        debug!("saving JSON feed to {}", path.display());
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl From<OfferCollection> for Feed {
    fn from(offers: OfferCollection) -> Self {
        Self { offers }
    }
}
