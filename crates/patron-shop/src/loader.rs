//! Catalog loading from CSV.
//!
//! Expected columns:
//!
//! ```csv
//! product_id,name,price_cents,kind
//! 0,Skirmish Starter Set,4999,miniature
//! 1,Chaos Black Primer,650,paint
//! ```
//!
//! `product_id` values must be dense (`0..n`, any row order); `kind` is one
//! of the lowercase [`ProductKind`] names. Prices are whole cents so that
//! catalog data stays exact — see [`patron_core::Money`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use patron_core::{Money, ProductId};
use serde::Deserialize;

use crate::error::{ShopError, ShopResult};
use crate::product::{Catalog, Product, ProductKind};

/// One row of the catalog CSV.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    product_id: u16,
    name: String,
    price_cents: u32,
    kind: String,
}

fn parse_kind(raw: &str) -> ShopResult<ProductKind> {
    match raw {
        "miniature" => Ok(ProductKind::Miniature),
        "paint" => Ok(ProductKind::Paint),
        "rulebook" => Ok(ProductKind::Rulebook),
        "dice" => Ok(ProductKind::Dice),
        "terrain" => Ok(ProductKind::Terrain),
        "scenery" => Ok(ProductKind::Scenery),
        other => Err(ShopError::Parse(format!("unknown product kind {other:?}"))),
    }
}

/// Load a catalog from a CSV file on disk.
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> ShopResult<Catalog> {
    let file = File::open(path)?;
    load_catalog_reader(file)
}

/// Load a catalog from any reader producing the CSV format above.
pub fn load_catalog_reader<R: Read>(reader: R) -> ShopResult<Catalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut slots: Vec<Option<Product>> = Vec::new();
    for result in csv_reader.deserialize() {
        let record: CatalogRecord = result.map_err(|e| ShopError::Parse(e.to_string()))?;
        let id = ProductId(record.product_id);
        let index = id.index();
        if index >= slots.len() {
            slots.resize(index + 1, None);
        }
        if slots[index].is_some() {
            return Err(ShopError::Parse(format!("duplicate product id {id}")));
        }
        slots[index] = Some(Product {
            id,
            name: record.name,
            price: Money(record.price_cents),
            kind: parse_kind(&record.kind)?,
        });
    }

    let mut products = Vec::with_capacity(slots.len());
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(product) => products.push(product),
            None => {
                return Err(ShopError::Parse(format!(
                    "missing product id {index}: ids must be dense 0..n"
                )));
            }
        }
    }
    Ok(Catalog::new(products))
}
