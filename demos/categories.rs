//! Example attaching category-specific attributes to offers.

use offer_feed::{
    Book, BookFormat, Clothing, Feed, Music, MusicFormat, Offer, VideoFormat, Videos, Wine,
    XmlOptions,
};

fn main() {
    let book = Book::new()
        .author(["Jane Doe", "John Roe"])
        .isbn("978-3-16-148410-0")
        .format(BookFormat::Hardcover)
        .pages(320)
        .publication_date((2019, 6, 1))
        .expect("Invalid publication date");

    let album = Music::new()
        .artist("The Band")
        .format(MusicFormat::Lp)
        .label("Indie Records")
        .release_date(chrono::NaiveDate::from_ymd_opt(2021, 3, 12).expect("Invalid date"))
        .expect("Invalid release date");

    let mut feed = Feed::new();
    feed.offers_mut().add([
        Offer::with_attributes(["Books", "Non-Fiction", "Autobiographies"], book)
            .name("A Life")
            .manufacturer("Big Publisher")
            .price(24.99)
            .sku("BK-1"),
        Offer::with_attributes(["Music", "Rock"], album)
            .name("Loud Noises")
            .manufacturer("Indie Records")
            .price(19.5)
            .sku("MU-1"),
        Offer::with_attributes(["DVDs & Videos"], Videos::new().format(VideoFormat::Dvd))
            .name("Film")
            .manufacturer("Studio")
            .price(9.99)
            .sku("VD-1"),
        Offer::with_attributes(
            ["Clothing", "Shirts"],
            Clothing::new().colour("Blue").size("M").gender("Unisex").style("Casual"),
        )
        .name("Shirt")
        .manufacturer("Tailor")
        .price(30.0)
        .sku("CL-1"),
        Offer::with_attributes(
            ["Wine", "Red"],
            Wine::new().region("Rioja").varietal("Tempranillo").volume("750ml"),
        )
        .name("Reserva")
        .manufacturer("Bodega")
        .price(15.0)
        .sku("WN-1"),
    ]);

    let xml = feed
        .to_xml_with(&XmlOptions::new().pretty())
        .expect("Failed to export XML");
    println!("{}", xml);
}
