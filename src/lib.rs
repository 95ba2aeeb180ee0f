//! # offer_feed
//!
//! A builder for price-comparison product feeds.
//!
//! ## Features
//!
//! - Chainable offer setters with markup stripped from every text field
//! - Category-specific attribute sets for books, clothing, music, videos and wine
//! - One falsy filter shared by the array, JSON and XML exports
//! - XML output with CDATA for free-text fields and optional pretty-printing
//!
//! ## Quick Start
//!
//! ```rust
//! use offer_feed::{Book, BookFormat, Feed, Offer};
//!
//! let mut feed = Feed::new();
//! feed.offers_mut().add(
//!     Offer::with_attributes(
//!         ["Books", "Non-Fiction", "Autobiographies"],
//!         Book::new().author(["A", "B"]).isbn("1234").format(BookFormat::Hardcover),
//!     )
//!     .name("Title")
//!     .manufacturer("Publisher")
//!     .price(249.99)
//!     .sku(666),
//! );
//!
//! let xml = feed.to_xml().unwrap();
//! assert!(xml.contains("<Author>A,B</Author>"));
//! assert!(xml.contains("<ProductName><![CDATA[Title]]></ProductName>"));
//! ```
//!
//! ## Editing Offers In Place
//!
//! ```rust
//! use offer_feed::{Offer, OfferCollection};
//!
//! let mut offers = OfferCollection::new();
//! offers.add([
//!     Offer::new(["Music"]).name("First").sku(1),
//!     Offer::new(["Music"]).name("Second").sku(2),
//! ]);
//!
//! if let Some(mut offer) = offers.find(2) {
//!     offer.edit(|o| o.price(9.99).marketplace(true));
//! }
//! offers.delete(1);
//!
//! assert_eq!(offers.count(), 1);
//! assert_eq!(offers[0].get("Price").and_then(|p| p.as_f64()), Some(9.99));
//! ```
//!
//! ## Pretty Output
//!
//! ```rust
//! use offer_feed::{Feed, Offer, XmlOptions};
//!
//! let mut feed = Feed::new();
//! feed.offers_mut().add(
//!     Offer::new(["Wine"]).name("Red").manufacturer("Winery").price(12.0).sku("W-1"),
//! );
//!
//! let xml = feed.to_xml_with(&XmlOptions::new().pretty()).unwrap();
//! assert!(xml.contains("\n    <Price>12</Price>"));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod attributes;
pub mod category;
pub mod collection;
pub mod date;
pub mod error;
pub mod escape;
pub mod feed;
pub mod offer;
pub mod tree;
pub mod value;
pub mod writer;

// Re-export main types and functions
pub use attributes::{filter_falsy, AttributeBag};
pub use category::{
    Book, BookFormat, Category, CategorySchema, Clothing, Music, MusicFormat, VideoFormat,
    Videos, Wine,
};
pub use collection::{CollectionId, FoundOffer, IntoOffers, OfferCollection};
pub use date::{iso_date, IntoDate};
pub use error::{Error, ErrorKind, Result};
pub use escape::{escape, strip_tags};
pub use feed::Feed;
pub use offer::{
    Availability, ContractPeriod, Offer, UnitMeasure, CDATA_FIELDS, ORDERED_FROM_SUPPLIER,
};
pub use tree::{append_map, Element, Node};
pub use value::{AttributeMap, Value};
pub use writer::{IndentConfig, XmlOptions, XmlWriter};
