//! Category-specific attribute schemas.
//!
//! Each product category carries its own extended attribute set. A schema is
//! configured with chained setters and then handed to an [`Offer`], which
//! keeps only its exported map under the `Attributes` key.
//!
//! ```rust
//! use offer_feed::{Book, BookFormat, Category};
//!
//! let book = Book::new()
//!     .author(["Author One", "Author Two"])
//!     .isbn("1234-5678")
//!     .format(BookFormat::Hardcover);
//!
//! assert!(book.validate().is_ok());
//! assert_eq!(book.export_map()["Author"].as_str(), Some("Author One,Author Two"));
//! ```
//!
//! [`Offer`]: crate::Offer

use crate::attributes::AttributeBag;
use crate::date::{iso_date, IntoDate};
use crate::error::Result;
use crate::value::{AttributeMap, Value};

/// Behaviour shared by every category schema.
pub trait Category {
    /// The underlying attribute bag.
    fn bag(&self) -> &AttributeBag;

    /// Keys this schema requires.
    fn required_keys(&self) -> &'static [&'static str] {
        self.bag().required_keys()
    }

    /// Checks the schema's required keys.
    fn validate(&self) -> Result<()> {
        self.bag().validate()
    }

    /// The filtered attribute map nested under an offer's `Attributes`.
    fn export_map(&self) -> AttributeMap {
        self.bag().export_map()
    }
}

/// The closed set of category schemas an offer can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySchema {
    /// Books.
    Book(Book),
    /// Clothing.
    Clothing(Clothing),
    /// Music.
    Music(Music),
    /// Videos.
    Videos(Videos),
    /// Wine.
    Wine(Wine),
}

impl CategorySchema {
    /// Name of the category variant.
    pub fn name(&self) -> &'static str {
        match self {
            CategorySchema::Book(_) => "Book",
            CategorySchema::Clothing(_) => "Clothing",
            CategorySchema::Music(_) => "Music",
            CategorySchema::Videos(_) => "Videos",
            CategorySchema::Wine(_) => "Wine",
        }
    }

    fn schema(&self) -> &dyn Category {
        match self {
            CategorySchema::Book(book) => book,
            CategorySchema::Clothing(clothing) => clothing,
            CategorySchema::Music(music) => music,
            CategorySchema::Videos(videos) => videos,
            CategorySchema::Wine(wine) => wine,
        }
    }
}

impl Category for CategorySchema {
    fn bag(&self) -> &AttributeBag {
        self.schema().bag()
    }

    fn export_map(&self) -> AttributeMap {
        self.schema().export_map()
    }
}

macro_rules! impl_schema_conversions {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for CategorySchema {
                fn from(schema: $variant) -> Self {
                    CategorySchema::$variant(schema)
                }
            }

            impl Default for $variant {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl Category for $variant {
                fn bag(&self) -> &AttributeBag {
                    &self.bag
                }
            }
        )*
    };
}

impl_schema_conversions!(Clothing, Music, Videos, Wine);

impl From<Book> for CategorySchema {
    fn from(book: Book) -> Self {
        CategorySchema::Book(book)
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

/// Book formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFormat {
    /// Hardcover.
    Hardcover,
    /// Soft cover.
    SoftCover,
    /// Audio book.
    Audio,
    /// Electronic book.
    Ebook,
}

impl BookFormat {
    /// The feed text for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Hardcover => "Hardcover",
            BookFormat::SoftCover => "Soft Cover",
            BookFormat::Audio => "Audio",
            BookFormat::Ebook => "eBook",
        }
    }
}

impl AsRef<str> for BookFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Book attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    bag: AttributeBag,
}

impl Book {
    const REQUIRED: &'static [&'static str] = &["Format", "ISBN"];

    /// Creates an empty book schema.
    pub fn new() -> Self {
        Self {
            bag: AttributeBag::new(Self::REQUIRED),
        }
    }

    /// Sets the format.
    pub fn format(mut self, format: impl AsRef<str>) -> Self {
        self.bag.set("Format", format.as_ref());
        self
    }

    /// Sets the ISBN.
    pub fn isbn(mut self, isbn: impl AsRef<str>) -> Self {
        self.bag.set("ISBN", isbn.as_ref());
        self
    }

    /// Sets the authors.
    ///
    /// Authors are exported as one comma-joined string. Commas inside a name
    /// are not escaped.
    pub fn author<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let authors: Vec<String> = authors.into_iter().map(Into::into).collect();
        self.bag.set("Author", authors);
        self
    }

    /// Sets the edition.
    pub fn edition(mut self, edition: i64) -> Self {
        self.bag.set("Edition", edition);
        self
    }

    /// Sets the genre.
    pub fn genre(mut self, genre: impl AsRef<str>) -> Self {
        self.bag.set("Genre", genre.as_ref());
        self
    }

    /// Sets the page count.
    pub fn pages(mut self, pages: i64) -> Self {
        self.bag.set("Pages", pages);
        self
    }

    /// Sets the publication date.
    pub fn publication_date<D: IntoDate>(mut self, date: D) -> Result<Self> {
        self.bag.set("PublicationDate", iso_date(date)?);
        Ok(self)
    }

    /// Sets the publisher.
    pub fn publisher(mut self, publisher: impl AsRef<str>) -> Self {
        self.bag.set("Publisher", publisher.as_ref());
        self
    }
}

impl Category for Book {
    fn bag(&self) -> &AttributeBag {
        &self.bag
    }

    fn export_map(&self) -> AttributeMap {
        let mut map = self.bag.export_map();
        let joined = match map.get("Author") {
            Some(Value::List(authors)) => authors
                .iter()
                .filter_map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
            _ => return map,
        };
        let joined = Value::Str(joined);
        if joined.is_truthy() {
            map.insert("Author".to_string(), joined);
        } else {
            map.shift_remove("Author");
        }
        map
    }
}

/// Clothing attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Clothing {
    bag: AttributeBag,
}

impl Clothing {
    const REQUIRED: &'static [&'static str] = &["AgeGroup", "Colour", "Gender", "Size"];

    /// Creates an empty clothing schema.
    pub fn new() -> Self {
        Self {
            bag: AttributeBag::new(Self::REQUIRED),
        }
    }

    /// Sets the age group.
    pub fn age_group(mut self, age_group: impl AsRef<str>) -> Self {
        self.bag.set("AgeGroup", age_group.as_ref());
        self
    }

    /// Sets the colour.
    pub fn colour(mut self, colour: impl AsRef<str>) -> Self {
        self.bag.set("Colour", colour.as_ref());
        self
    }

    /// Sets the gender.
    pub fn gender(mut self, gender: impl AsRef<str>) -> Self {
        self.bag.set("Gender", gender.as_ref());
        self
    }

    /// Sets the size.
    pub fn size(mut self, size: impl AsRef<str>) -> Self {
        self.bag.set("Size", size.as_ref());
        self
    }

    /// Sets the material.
    pub fn material(mut self, material: impl AsRef<str>) -> Self {
        self.bag.set("Material", material.as_ref());
        self
    }

    /// Sets the pattern.
    pub fn pattern(mut self, pattern: impl AsRef<str>) -> Self {
        self.bag.set("Pattern", pattern.as_ref());
        self
    }

    /// Sets the size type.
    pub fn size_type(mut self, size_type: impl AsRef<str>) -> Self {
        self.bag.set("SizeType", size_type.as_ref());
        self
    }

    /// Sets the style. Stored under the lowercase `style` key.
    pub fn style(mut self, style: impl AsRef<str>) -> Self {
        self.bag.set("style", style.as_ref());
        self
    }
}

/// Music formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicFormat {
    /// Compact disc.
    Cd,
    /// Cassette tape.
    Cassette,
    /// Long play record.
    Lp,
    /// DVD.
    Dvd,
    /// Download.
    Downloadable,
    /// Streaming.
    Streaming,
}

impl MusicFormat {
    /// The feed text for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicFormat::Cd => "CD",
            MusicFormat::Cassette => "Cassette",
            MusicFormat::Lp => "LP",
            MusicFormat::Dvd => "DVD",
            MusicFormat::Downloadable => "Downloadable",
            MusicFormat::Streaming => "Streaming",
        }
    }
}

impl AsRef<str> for MusicFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Music attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Music {
    bag: AttributeBag,
}

impl Music {
    const REQUIRED: &'static [&'static str] = &["Format"];

    /// Creates an empty music schema.
    pub fn new() -> Self {
        Self {
            bag: AttributeBag::new(Self::REQUIRED),
        }
    }

    /// Sets the format.
    pub fn format(mut self, format: impl AsRef<str>) -> Self {
        self.bag.set("Format", format.as_ref());
        self
    }

    /// Sets the artist.
    pub fn artist(mut self, artist: impl AsRef<str>) -> Self {
        self.bag.set("Artist", artist.as_ref());
        self
    }

    /// Sets the record label.
    pub fn label(mut self, label: impl AsRef<str>) -> Self {
        self.bag.set("Label", label.as_ref());
        self
    }

    /// Sets the release date.
    pub fn release_date<D: IntoDate>(mut self, date: D) -> Result<Self> {
        self.bag.set("ReleaseDate", iso_date(date)?);
        Ok(self)
    }
}

/// Video formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    /// DVD.
    Dvd,
    /// Laser disc.
    LaserDisc,
    /// VHS tape.
    Vhs,
    /// Download.
    Downloadable,
    /// Streaming.
    Streaming,
}

impl VideoFormat {
    /// The feed text for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoFormat::Dvd => "DVD",
            VideoFormat::LaserDisc => "Laser Disc",
            VideoFormat::Vhs => "VHS",
            VideoFormat::Downloadable => "Downloadable",
            VideoFormat::Streaming => "Streaming",
        }
    }
}

impl AsRef<str> for VideoFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Video attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Videos {
    bag: AttributeBag,
}

impl Videos {
    const REQUIRED: &'static [&'static str] = &["Format"];

    /// Creates an empty video schema.
    pub fn new() -> Self {
        Self {
            bag: AttributeBag::new(Self::REQUIRED),
        }
    }

    /// Sets the format.
    pub fn format(mut self, format: impl AsRef<str>) -> Self {
        self.bag.set("Format", format.as_ref());
        self
    }
}

/// Wine attributes. Nothing is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Wine {
    bag: AttributeBag,
}

impl Wine {
    /// Creates an empty wine schema.
    pub fn new() -> Self {
        Self {
            bag: AttributeBag::new(&[]),
        }
    }

    /// Sets the region.
    pub fn region(mut self, region: impl AsRef<str>) -> Self {
        self.bag.set("Region", region.as_ref());
        self
    }

    /// Sets the varietal.
    pub fn varietal(mut self, varietal: impl AsRef<str>) -> Self {
        self.bag.set("Varietal", varietal.as_ref());
        self
    }

    /// Sets the volume.
    pub fn volume(mut self, volume: impl AsRef<str>) -> Self {
        self.bag.set("Volume", volume.as_ref());
        self
    }

    /// Sets the winery.
    pub fn winery(mut self, winery: impl AsRef<str>) -> Self {
        self.bag.set("Winery", winery.as_ref());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_joins_authors() {
        let book = Book::new()
            .format(BookFormat::Hardcover)
            .isbn("12345")
            .author(["Author One", "Author Two", "Author Three"]);

        let map = book.export_map();
        assert_eq!(
            map.get("Author"),
            Some(&Value::from("Author One,Author Two,Author Three"))
        );
        assert_eq!(map.get("Format"), Some(&Value::from("Hardcover")));
    }

    #[test]
    fn test_book_author_commas_are_not_escaped() {
        let book = Book::new().author(["Smith, J.", "Doe"]);
        assert_eq!(book.export_map()["Author"], Value::from("Smith, J.,Doe"));
    }

    #[test]
    fn test_book_without_authors() {
        let book = Book::new().isbn("1").author(Vec::<String>::new());
        assert!(!book.export_map().contains_key("Author"));
    }

    #[test]
    fn test_book_blank_authors_are_dropped() {
        let book = Book::new().isbn("1").author([""]);
        let map = book.export_map();
        assert!(!map.contains_key("Author"));
        assert!(map.values().all(Value::is_truthy));
    }

    #[test]
    fn test_book_required_keys() {
        let book = Book::new().isbn("12345");
        assert_eq!(book.required_keys(), &["Format", "ISBN"]);
        assert_eq!(book.validate().unwrap_err().missing_key(), Some("Format"));
    }

    #[test]
    fn test_book_publication_date() {
        let book = Book::new().publication_date((2009, 6, 1)).unwrap();
        assert_eq!(book.export_map()["PublicationDate"], Value::from("2009-06-01"));

        let year_only = Book::new().publication_date(2009).unwrap();
        assert_eq!(year_only.export_map()["PublicationDate"], Value::from("2009-01-01"));

        assert!(Book::new().publication_date((2009, 2, 29)).is_err());
    }

    #[test]
    fn test_book_numbers() {
        let book = Book::new().edition(2).pages(0);
        let map = book.export_map();
        assert_eq!(map["Edition"], Value::Int(2));
        assert!(!map.contains_key("Pages"));
    }

    #[test]
    fn test_clothing() {
        let clothing = Clothing::new()
            .age_group("Adult")
            .colour("Navy")
            .gender("Female")
            .size("M")
            .style("Casual");

        assert!(clothing.validate().is_ok());
        assert_eq!(clothing.export_map()["style"], Value::from("Casual"));

        let incomplete = Clothing::new().age_group("Adult").gender("Male");
        assert_eq!(incomplete.validate().unwrap_err().missing_key(), Some("Colour"));
    }

    #[test]
    fn test_music_release_date() {
        let music = Music::new()
            .format(MusicFormat::Lp)
            .artist("Band")
            .release_date(chrono::NaiveDate::from_ymd_opt(1977, 10, 28).unwrap())
            .unwrap();

        let map = music.export_map();
        assert_eq!(map["Format"], Value::from("LP"));
        assert_eq!(map["ReleaseDate"], Value::from("1977-10-28"));
    }

    #[test]
    fn test_videos_and_wine() {
        let videos = Videos::new();
        assert_eq!(videos.validate().unwrap_err().missing_key(), Some("Format"));
        assert!(Videos::new().format(VideoFormat::LaserDisc).validate().is_ok());

        let wine = Wine::new().region("Stellenbosch").varietal("Pinotage");
        assert!(wine.validate().is_ok());
        assert_eq!(wine.export_map().len(), 2);
    }

    #[test]
    fn test_schema_dispatch() {
        let schema: CategorySchema = Book::new().author(["A", "B"]).into();
        assert_eq!(schema.name(), "Book");
        assert_eq!(schema.required_keys(), &["Format", "ISBN"]);
        assert_eq!(schema.export_map()["Author"], Value::from("A,B"));

        let schema = CategorySchema::from(Wine::new().winery("Estate"));
        assert_eq!(schema.name(), "Wine");
        assert!(schema.validate().is_ok());
    }
}
