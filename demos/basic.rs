//! Basic example building a small feed and printing every export format.

use offer_feed::{Feed, Offer, XmlOptions};

fn init_logging() {
    let colors = fern::colors::ColoredLevelConfig::new()
        .error(fern::colors::Color::Red)
        .warn(fern::colors::Color::Yellow)
        .trace(fern::colors::Color::BrightBlack);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "\x1B[{}m[{}] {}\x1B[0m",
                colors.get_color(&record.level()).to_fg_str(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()
        .expect("Failed to configure logging");
}

fn main() {
    init_logging();

    let mut feed = Feed::new();
    feed.offers_mut().add([
        Offer::new(["Books", "Fiction"])
            .name("Some Product")
            .manufacturer("Zebra Books")
            .price(99.95)
            .sku(12345),
        Offer::new(["Books", "Fiction"])
            .name("Another <b>Product</b>")
            .manufacturer("Someone")
            .price(169.95)
            .sku(54321)
            .description("Ships in <i>two</i> days & arrives wrapped"),
    ]);

    // Array export
    println!("Array:");
    println!("{:#?}", feed.to_array());
    println!();

    // JSON export
    let json = feed.to_json(true).expect("Failed to encode JSON");
    println!("JSON:");
    println!("{}", json);
    println!();

    // Compact XML
    let xml = feed.to_xml().expect("Failed to export XML");
    println!("Compact XML:");
    println!("{}", xml);
    println!();

    // Pretty XML
    let pretty = feed
        .to_xml_with(&XmlOptions::new().pretty())
        .expect("Failed to export XML");
    println!("Pretty XML:");
    println!("{}", pretty);
    println!();

    // An offer without a price cannot be exported as XML
    feed.offers_mut()
        .add(Offer::new(["Books"]).name("Unpriced").manufacturer("Nobody").sku(1));
    match feed.to_xml() {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("XML export refused: {}", e),
    }
}
