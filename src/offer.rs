//! Offers: one catalog entry in a price-comparison feed.
//!
//! An offer is an [`AttributeBag`] with five required keys and a fixed set of
//! text fields. Text fields have markup stripped when they are set and are
//! wrapped in CDATA when exported as XML.
//!
//! ```rust
//! use offer_feed::{Book, BookFormat, Offer};
//!
//! let offer = Offer::with_attributes(
//!     ["Books", "Non-Fiction", "Autobiographies"],
//!     Book::new().author(["Some Author"]).isbn("1234-5678").format(BookFormat::Hardcover),
//! )
//! .name("Black and White: The Jake White Story")
//! .manufacturer("Zebra Books")
//! .price(249.99)
//! .sku(666555444);
//!
//! assert!(offer.validate().is_ok());
//! assert_eq!(
//!     offer.to_array()["Category"].as_str(),
//!     Some("Books > Non-Fiction > Autobiographies")
//! );
//! ```

use crate::attributes::AttributeBag;
use crate::category::{Category, CategorySchema};
use crate::collection::CollectionId;
use crate::error::Result;
use crate::escape::strip_tags;
use crate::tree::{append_map, Element};
use crate::value::{AttributeMap, Value};
use std::borrow::Cow;
use std::fmt::Display;

/// Fields whose XML text is wrapped in a CDATA section.
pub const CDATA_FIELDS: &[&str] = &[
    "Category",
    "ProductName",
    "Manufacturer",
    "ShopSKU",
    "ModelNumber",
    "Description",
    "ProductURL",
    "ImageURL",
    "Notes",
    "StockAvailability",
    "GroupID",
];

/// Stock level meaning "ordered from the supplier on demand".
pub const ORDERED_FROM_SUPPLIER: i64 = -1;

const REQUIRED: &[&str] = &["Category", "Price", "ProductName", "Manufacturer", "ShopSKU"];

const SECOND_HAND_SUFFIX: &str = " SecondHand";

const CATEGORY_SEPARATOR: &str = " > ";

/// Contract pricing period units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractPeriod {
    /// Months.
    #[default]
    Months,
    /// Weeks.
    Weeks,
    /// Days.
    Days,
}

impl ContractPeriod {
    /// The feed text for this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractPeriod::Months => "Months",
            ContractPeriod::Weeks => "Weeks",
            ContractPeriod::Days => "Days",
        }
    }
}

impl AsRef<str> for ContractPeriod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Stock availability statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// In stock.
    InStock,
    /// Out of stock.
    OutOfStock,
}

impl Availability {
    /// The feed text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::OutOfStock => "Out of Stock",
        }
    }
}

impl AsRef<str> for Availability {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Units for [`Offer::units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMeasure {
    /// Millilitres.
    Millilitre,
    /// Litres.
    Litre,
    /// Kilolitres.
    Kilolitre,
    /// Millimetres.
    Millimetre,
    /// Centimetres.
    Centimetre,
    /// Metres.
    Metre,
}

impl UnitMeasure {
    /// The feed text for this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMeasure::Millilitre => "ml",
            UnitMeasure::Litre => "l",
            UnitMeasure::Kilolitre => "kl",
            UnitMeasure::Millimetre => "mm",
            UnitMeasure::Centimetre => "cm",
            UnitMeasure::Metre => "m",
        }
    }
}

impl AsRef<str> for UnitMeasure {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A single product offer.
///
/// Setters consume and return the offer so they can be chained. Use
/// [`Offer::edit`] to chain setters on an offer reached through `&mut`.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    bag: AttributeBag,
    second_hand: bool,
    parent: Option<CollectionId>,
}

impl Default for Offer {
    fn default() -> Self {
        let mut bag = AttributeBag::new(REQUIRED);
        bag.set("Category", Value::Null);
        bag.set("Attributes", Value::Null);
        Self {
            bag,
            second_hand: false,
            parent: None,
        }
    }
}

impl Offer {
    /// Creates an offer in the given category path.
    pub fn new<I, S>(signature: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut offer = Self::default();
        offer.set_signature(signature);
        offer
    }

    /// Creates an offer with category-specific attributes.
    pub fn with_attributes<I, S, C>(signature: I, schema: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Into<CategorySchema>,
    {
        let mut offer = Self::new(signature);
        offer.set_schema(schema.into());
        offer
    }

    fn set_signature<I, S>(&mut self, signature: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = signature
            .into_iter()
            .map(|part| part.as_ref().to_string())
            .collect();
        let value = if parts.is_empty() {
            Value::Null
        } else {
            Value::from(strip_tags(&parts.join(CATEGORY_SEPARATOR)))
        };
        self.bag.set("Category", value);
    }

    fn set_schema(&mut self, schema: CategorySchema) {
        self.bag.set("Attributes", schema.export_map());
    }

    fn text(mut self, key: &str, value: &str) -> Self {
        self.bag.set(key, strip_tags(value));
        self
    }

    /// Replaces every attribute at once. String values have markup stripped.
    pub fn fill(mut self, attributes: AttributeMap) -> Self {
        let sanitized = attributes
            .into_iter()
            .map(|(key, value)| (key, sanitize(value)))
            .collect();
        self.bag.replace(sanitized);
        self
    }

    /// Sets the category path, keeping any existing category attributes.
    pub fn category<I, S>(mut self, signature: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_signature(signature);
        self
    }

    /// Sets the category path and replaces the category attributes.
    pub fn category_with<I, S, C>(mut self, signature: I, schema: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Into<CategorySchema>,
    {
        self.set_signature(signature);
        self.set_schema(schema.into());
        self
    }

    /// Sets the product name.
    pub fn name(self, name: impl AsRef<str>) -> Self {
        self.text("ProductName", name.as_ref())
    }

    /// Sets the manufacturer.
    pub fn manufacturer(self, manufacturer: impl AsRef<str>) -> Self {
        self.text("Manufacturer", manufacturer.as_ref())
    }

    /// Sets the shop SKU, the business key used by collections.
    pub fn sku(self, sku: impl Display) -> Self {
        self.text("ShopSKU", &sku.to_string())
    }

    /// Sets the description.
    pub fn description(self, description: impl AsRef<str>) -> Self {
        self.text("Description", description.as_ref())
    }

    /// Sets the EAN barcode.
    pub fn ean(self, ean: impl Display) -> Self {
        self.text("EAN", &ean.to_string())
    }

    /// Sets the UPC barcode.
    pub fn upc(self, upc: impl Display) -> Self {
        self.text("UPC", &upc.to_string())
    }

    /// Sets the model number.
    pub fn model_number(self, model_number: impl AsRef<str>) -> Self {
        self.text("ModelNumber", model_number.as_ref())
    }

    /// Sets the product page URL.
    pub fn product_url(self, url: impl AsRef<str>) -> Self {
        self.text("ProductURL", url.as_ref())
    }

    /// Sets the product image URL.
    pub fn image_url(self, url: impl AsRef<str>) -> Self {
        self.text("ImageURL", url.as_ref())
    }

    /// Sets the price.
    pub fn price(mut self, price: f64) -> Self {
        self.bag.set("Price", price);
        self
    }

    /// Sets the price with optional sale price and delivery cost.
    ///
    /// A missing or zero sale price or delivery cost leaves that field unset.
    pub fn price_with(
        self,
        price: f64,
        sale_price: Option<f64>,
        delivery_cost: Option<f64>,
    ) -> Self {
        let mut offer = self.price(price);
        if let Some(sale_price) = sale_price.filter(|p| *p != 0.0) {
            offer = offer.sale_price(sale_price);
        }
        if let Some(delivery_cost) = delivery_cost.filter(|c| *c != 0.0) {
            offer = offer.delivery_cost(delivery_cost);
        }
        offer
    }

    /// Sets the sale price.
    pub fn sale_price(mut self, sale_price: f64) -> Self {
        self.bag.set("SalePrice", sale_price);
        self
    }

    /// Sets the delivery cost.
    pub fn delivery_cost(mut self, delivery_cost: f64) -> Self {
        self.bag.set("DeliveryCost", delivery_cost);
        self
    }

    /// Sets contract pricing.
    pub fn contract_pricing(
        mut self,
        cash: f64,
        period_length: i64,
        period_type: impl AsRef<str>,
    ) -> Self {
        let mut pricing = AttributeMap::new();
        pricing.insert("CashComponent".to_string(), Value::Float(cash));
        pricing.insert("PeriodLength".to_string(), Value::Int(period_length));
        pricing.insert(
            "PeriodType".to_string(),
            Value::from(strip_tags(period_type.as_ref())),
        );
        self.bag.set("ContractPricing", pricing);
        self
    }

    /// Sets stock availability and level.
    ///
    /// Both fields are stored as given; `None` clears them.
    pub fn availability(mut self, status: Option<&str>, level: Option<i64>) -> Self {
        self.bag.set("StockAvailability", status.map(strip_tags));
        self.bag.set("StockLevel", level);
        self
    }

    /// Flags the offer as second hand.
    ///
    /// Only notes set afterwards carry the second hand marker.
    pub fn second_hand(mut self, second_hand: bool) -> Self {
        self.second_hand = second_hand;
        self
    }

    /// Sets the notes, appending the second hand marker if flagged.
    pub fn notes(mut self, notes: impl AsRef<str>) -> Self {
        let mut text = strip_tags(notes.as_ref()).into_owned();
        if self.second_hand {
            text.push_str(SECOND_HAND_SUFFIX);
        }
        self.bag.set("Notes", text);
        self
    }

    /// Lists the offer on the marketplace.
    pub fn marketplace(mut self, marketplace: bool) -> Self {
        self.bag.set("Marketplace", marketplace.then_some("1"));
        self
    }

    /// Marks the offer as a bundle.
    pub fn bundle(mut self, bundle: bool) -> Self {
        self.bag.set("Bundle", bundle.then_some("1"));
        self
    }

    /// Sets the group identifier shared by product variants.
    pub fn group_id(self, group_id: impl Display) -> Self {
        self.text("GroupID", &group_id.to_string())
    }

    /// Sets the unit count and unit size.
    pub fn units(mut self, count: i64, unit: i64, measure: impl AsRef<str>) -> Self {
        let mut unit_measure = AttributeMap::new();
        unit_measure.insert("Unit".to_string(), Value::Int(unit));
        unit_measure.insert("Measure".to_string(), Value::from(strip_tags(measure.as_ref())));
        self.bag.set("NoOfUnits", count);
        self.bag.set("UnitMeasure", unit_measure);
        self
    }

    /// Applies chained setters to an offer held by mutable reference.
    pub fn edit<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Offer) -> Offer,
    {
        let offer = std::mem::take(self);
        *self = f(offer);
        self
    }

    /// The raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.bag.get(key)
    }

    /// The unfiltered attribute map.
    pub fn attributes(&self) -> &AttributeMap {
        self.bag.attributes()
    }

    /// Keys that must be present before XML export.
    pub fn required_keys(&self) -> &'static [&'static str] {
        self.bag.required_keys()
    }

    /// The exported shop SKU, if it survives filtering.
    pub fn shop_sku(&self) -> Option<Cow<'_, str>> {
        self.bag
            .get("ShopSKU")
            .filter(|sku| sku.is_truthy())
            .and_then(Value::to_text)
    }

    /// Whether the second hand flag is set.
    pub fn is_second_hand(&self) -> bool {
        self.second_hand
    }

    /// The collection this offer was last found in.
    pub fn parent(&self) -> Option<CollectionId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: CollectionId) {
        self.parent = Some(parent);
    }

    /// Checks the required keys.
    pub fn validate(&self) -> Result<()> {
        self.bag.validate()
    }

    /// The attribute map with falsy values removed.
    pub fn to_array(&self) -> AttributeMap {
        self.bag.export_map()
    }

    /// Appends this offer's attributes as children of `node`.
    ///
    /// Validation runs first; nothing is appended when a required key is
    /// missing or an exported key is not a valid element name.
    pub fn to_xml_node(&self, node: &mut Element) -> Result<()> {
        self.validate()?;
        append_map(node, &self.to_array(), CDATA_FIELDS)
    }
}

fn sanitize(value: Value) -> Value {
    match value {
        Value::Str(s) => Value::from(strip_tags(&s)),
        Value::List(items) => Value::List(items.into_iter().map(sanitize).collect()),
        Value::Map(map) => Value::Map(
            map.into_iter()
                .map(|(key, value)| (key, sanitize(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Book, BookFormat, Wine};
    use crate::error::ErrorKind;

    fn complete() -> Offer {
        Offer::new(["Books", "Fiction"])
            .name("Another Product")
            .manufacturer("Someone")
            .price(169.95)
            .sku(54321)
    }

    #[test]
    fn test_category_signature() {
        let offer = Offer::new(["Books", "Non-Fiction", "Autobiographies"]);
        assert_eq!(
            offer.to_array()["Category"],
            Value::from("Books > Non-Fiction > Autobiographies")
        );
    }

    #[test]
    fn test_extended_attributes() {
        let offer = Offer::with_attributes(
            ["Books", "Non-Fiction", "Autobiographies"],
            Book::new().format(BookFormat::Hardcover).isbn("12345").author(["Author"]),
        );
        let array = offer.to_array();
        let attributes = array["Attributes"].as_map().unwrap();
        assert_eq!(attributes["Format"], Value::from("Hardcover"));
        assert_eq!(attributes["Author"], Value::from("Author"));
    }

    #[test]
    fn test_category_keeps_attributes_unless_replaced() {
        let offer = Offer::with_attributes(["Books"], Book::new().author(["Joe Schmoe"]))
            .category(["Books", "Children", "Boys"]);
        let array = offer.to_array();
        assert_eq!(array["Category"], Value::from("Books > Children > Boys"));
        assert_eq!(array["Attributes"].as_map().unwrap()["Author"], Value::from("Joe Schmoe"));

        let offer = offer.category_with(["Wine", "Red"], Wine::new().region("Paarl"));
        let array = offer.to_array();
        let attributes = array["Attributes"].as_map().unwrap();
        assert!(!attributes.contains_key("Author"));
        assert_eq!(attributes["Region"], Value::from("Paarl"));
    }

    #[test]
    fn test_product_details() {
        let offer = Offer::new(["Books"])
            .name("In Black and White")
            .manufacturer("Zebra Press")
            .sku(12)
            .ean("600332531354341");
        let array = offer.to_array();
        assert_eq!(array["ShopSKU"], Value::from("12"));
        assert_eq!(array["Manufacturer"], Value::from("Zebra Press"));
        assert_eq!(array["EAN"], Value::from("600332531354341"));
    }

    #[test]
    fn test_text_fields_are_sanitized() {
        let offer = Offer::new(["<b>Books</b>"])
            .name("<h1>Title</h1>")
            .description("Great <script>read</script>")
            .notes("<em>mint</em>");
        let array = offer.to_array();
        assert_eq!(array["Category"], Value::from("Books"));
        assert_eq!(array["ProductName"], Value::from("Title"));
        assert_eq!(array["Description"], Value::from("Great read"));
        assert_eq!(array["Notes"], Value::from("mint"));
    }

    #[test]
    fn test_pricing() {
        let offer = Offer::new(["Books"]).price_with(149.95, Some(139.95), Some(45.0));
        let array = offer.to_array();
        assert_eq!(array["Price"], Value::Float(149.95));
        assert_eq!(array["SalePrice"], Value::Float(139.95));
        assert_eq!(array["DeliveryCost"], Value::Float(45.0));
    }

    #[test]
    fn test_zero_optional_prices_are_not_set() {
        let offer = Offer::new(["Books"]).price_with(10.0, Some(0.0), None);
        assert!(offer.get("SalePrice").is_none());
        assert!(offer.get("DeliveryCost").is_none());
    }

    #[test]
    fn test_zero_price_is_dropped_on_export() {
        let offer = Offer::new(["Books"]).price(0.0);
        assert_eq!(offer.get("Price"), Some(&Value::Float(0.0)));
        assert!(!offer.to_array().contains_key("Price"));
    }

    #[test]
    fn test_contract_pricing() {
        let offer = Offer::new(["Phones"]).contract_pricing(600.0, 24, ContractPeriod::Months);
        let array = offer.to_array();
        let pricing = array["ContractPricing"].as_map().unwrap();
        assert_eq!(pricing["CashComponent"], Value::Float(600.0));
        assert_eq!(pricing["PeriodLength"], Value::Int(24));
        assert_eq!(pricing["PeriodType"], Value::from("Months"));
    }

    #[test]
    fn test_urls() {
        let offer = Offer::new(["Books"])
            .product_url("https://product.test")
            .image_url("https://image.test");
        let array = offer.to_array();
        assert_eq!(array["ProductURL"], Value::from("https://product.test"));
        assert_eq!(array["ImageURL"], Value::from("https://image.test"));
    }

    #[test]
    fn test_second_hand_notes() {
        let offer = Offer::new(["Books"]).second_hand(true).notes("This product is not new");
        assert_eq!(
            offer.to_array()["Notes"],
            Value::from("This product is not new SecondHand")
        );
    }

    #[test]
    fn test_second_hand_is_not_retroactive() {
        let offer = Offer::new(["Books"]).notes("Used").second_hand(true);
        assert!(offer.is_second_hand());
        assert_eq!(offer.to_array()["Notes"], Value::from("Used"));
    }

    #[test]
    fn test_flags() {
        let offer = Offer::new(["Books"]).marketplace(true).bundle(false);
        let array = offer.to_array();
        assert_eq!(array["Marketplace"], Value::from("1"));
        assert!(!array.contains_key("Bundle"));
        assert_eq!(offer.get("Bundle"), Some(&Value::Null));
    }

    #[test]
    fn test_availability() {
        let offer = Offer::new(["Books"])
            .availability(Some(Availability::InStock.as_str()), Some(ORDERED_FROM_SUPPLIER));
        let array = offer.to_array();
        assert_eq!(array["StockAvailability"], Value::from("In Stock"));
        assert_eq!(array["StockLevel"], Value::Int(-1));

        let cleared = offer.availability(None, Some(0));
        let array = cleared.to_array();
        assert!(!array.contains_key("StockAvailability"));
        assert!(!array.contains_key("StockLevel"));
    }

    #[test]
    fn test_units() {
        let offer = Offer::new(["Wine"]).units(6, 750, UnitMeasure::Millilitre);
        let array = offer.to_array();
        assert_eq!(array["NoOfUnits"], Value::Int(6));
        let measure = array["UnitMeasure"].as_map().unwrap();
        assert_eq!(measure["Unit"], Value::Int(750));
        assert_eq!(measure["Measure"], Value::from("ml"));
    }

    #[test]
    fn test_validate_names_missing_field() {
        assert!(complete().validate().is_ok());

        let no_category = Offer::new(Vec::<&str>::new())
            .name("N")
            .manufacturer("M")
            .price(1.0)
            .sku(1);
        assert_eq!(no_category.validate().unwrap_err().missing_key(), Some("Category"));

        let no_price = Offer::new(["Books"]).name("N").manufacturer("M").sku(1);
        assert_eq!(no_price.validate().unwrap_err().missing_key(), Some("Price"));

        let no_name = Offer::new(["Books"]).manufacturer("M").price(1.0).sku(1);
        assert_eq!(no_name.validate().unwrap_err().missing_key(), Some("ProductName"));

        let no_manufacturer = Offer::new(["Books"]).name("N").price(1.0).sku(1);
        assert_eq!(
            no_manufacturer.validate().unwrap_err().missing_key(),
            Some("Manufacturer")
        );

        let no_sku = Offer::new(["Books"]).name("N").manufacturer("M").price(1.0);
        assert_eq!(no_sku.validate().unwrap_err().missing_key(), Some("ShopSKU"));
    }

    #[test]
    fn test_to_xml_node_rejects_invalid_key() {
        let mut map = complete().attributes().clone();
        map.insert("Bad Key".to_string(), Value::from("x"));
        let offer = Offer::default().fill(map);
        assert!(offer.validate().is_ok());

        let mut node = Element::new("Offer");
        let err = offer.to_xml_node(&mut node).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidElementName(name) if name == "Bad Key"));
        assert!(node.is_empty());
    }

    #[test]
    fn test_to_xml_node_validates_first() {
        let offer = Offer::new(["Books"]).name("N").price(1.0).sku(1);
        let mut node = Element::new("Offer");
        let err = offer.to_xml_node(&mut node).unwrap_err();
        assert_eq!(err.missing_key(), Some("Manufacturer"));
        assert!(node.is_empty());
    }

    #[test]
    fn test_to_xml_node() {
        let mut node = Element::new("Offer");
        complete().to_xml_node(&mut node).unwrap();

        let name = node.child("ProductName").unwrap();
        assert!(name.is_cdata());
        assert_eq!(name.text(), "Another Product");

        let price = node.child("Price").unwrap();
        assert!(!price.is_cdata());
        assert_eq!(price.text(), "169.95");
        assert!(node.child("Attributes").is_none());
    }

    #[test]
    fn test_fill_replaces_and_sanitizes() {
        let mut map = AttributeMap::new();
        map.insert("ShopSKU".to_string(), Value::from("<i>99</i>"));
        map.insert("Price".to_string(), Value::Float(5.0));

        let offer = complete().fill(map);
        let array = offer.to_array();
        assert_eq!(array.len(), 2);
        assert_eq!(array["ShopSKU"], Value::from("99"));
        assert_eq!(offer.required_keys(), REQUIRED);
    }

    #[test]
    fn test_edit_in_place() {
        let mut offer = complete();
        offer.edit(|o| o.sku("new").group_id(7));
        assert_eq!(offer.shop_sku().as_deref(), Some("new"));
        assert_eq!(offer.to_array()["GroupID"], Value::from("7"));
    }
}
