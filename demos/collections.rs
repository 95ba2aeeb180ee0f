//! Example finding, editing, cloning and deleting offers in a collection.

use offer_feed::{Availability, Offer, OfferCollection, ORDERED_FROM_SUPPLIER};

fn main() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stderr())
        .apply()
        .expect("Failed to configure logging");

    let mut offers = OfferCollection::new();
    offers.add(
        (1..=3)
            .map(|i| {
                Offer::new(["Electronics", "Cables"])
                    .name(format!("Cable {}", i))
                    .manufacturer("Wires Ltd")
                    .price(4.99 * i as f64)
                    .sku(format!("CBL-{}", i))
            })
            .collect::<Vec<_>>(),
    );
    println!("Collection holds {} offers", offers.count());

    // Edit an offer in place
    if let Some(mut offer) = offers.find("CBL-2") {
        offer.edit(|o| {
            o.availability(Some(Availability::InStock.as_str()), Some(ORDERED_FROM_SUPPLIER))
                .marketplace(true)
        });
        println!("Edited offer at index {}", offer.index());
    }

    // Clone an offer under a new SKU
    if let Some(copy) = offers.clone_offer("CBL-1") {
        offers.add(copy.sku("CBL-1-B").name("Cable 1 (boxed)"));
    }

    // Delete through the found handle and by key
    if let Some(found) = offers.find("CBL-3") {
        found.delete();
    }
    offers.delete("CBL-1");

    println!("Remaining offers:");
    for offer in &offers {
        println!(
            "  {} ({})",
            offer.shop_sku().unwrap_or_default(),
            offer.get("ProductName").and_then(|v| v.as_str()).unwrap_or("")
        );
    }

    println!();
    println!("{}", offers.to_json(true).expect("Failed to encode JSON"));
}
