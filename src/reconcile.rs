//! Stock reconciliation
//!
//! Resolves every cart line against the fetched catalog and verifies the
//! requested quantities against the adjusted stock figure. Two passes:
//! resolve-all first, then verify-all, so an unknown product id is always
//! reported before any insufficient-stock violation.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{stock_real, CatalogProduct, LineItem, ProcessedLine};

/// Resolve cart lines against the catalog and check availability.
///
/// Pass 1 looks every line up by exact string id match in request order and
/// fails with `NotFound` on the first miss. Pass 2 then checks
/// `quantity_requested <= stock_real` for every resolved line and fails with
/// `InsufficientStock` on the first violation.
pub fn reconcile(lines: &[LineItem], catalog: &[CatalogProduct]) -> Result<Vec<ProcessedLine>> {
    let mut processed = Vec::with_capacity(lines.len());

    for item in lines {
        let wanted = item.product_id.trim();
        let product = catalog
            .iter()
            .find(|p| p.id.to_string() == wanted)
            .ok_or_else(|| Error::NotFound {
                product_id: wanted.to_string(),
            })?;

        let sr = stock_real(product.stock, product.rating);

        debug!(
            product_id = wanted,
            name = %product.title,
            price_per_unit = item.price,
            discount = item.discount,
            quantity_requested = item.quantity,
            stock_obtained = product.stock,
            rating = product.rating,
            stock_real = sr,
            "Resolved cart line"
        );

        processed.push(ProcessedLine {
            id: wanted.to_string(),
            name: product.title.clone(),
            price_per_unit: item.price,
            discount: item.discount,
            quantity_requested: item.quantity,
            stock_obtained: product.stock,
            rating: product.rating,
            stock_real: sr,
        });
    }

    for line in &processed {
        if line.quantity_requested > line.stock_real {
            return Err(Error::InsufficientStock {
                product_id: line.id.clone(),
                name: line.name.clone(),
                requested: line.quantity_requested,
                available: line.stock_real,
            });
        }
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, stock: u32, rating: f64) -> CatalogProduct {
        CatalogProduct {
            id,
            title: format!("Product {}", id),
            stock,
            rating,
        }
    }

    fn line(product_id: &str, quantity: i64) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            price: 10.0,
            quantity,
            discount: 0.0,
        }
    }

    #[test]
    fn test_quantity_within_stock_real_passes() {
        // stock=20, rating=4 -> Sr=5
        let catalog = vec![product(1, 20, 4.0)];
        let processed = reconcile(&[line("1", 5)], &catalog).unwrap();

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].stock_real, 5);
        assert_eq!(processed[0].name, "Product 1");
        assert_eq!(processed[0].stock_obtained, 20);
    }

    #[test]
    fn test_quantity_above_stock_real_fails() {
        let catalog = vec![product(1, 20, 4.0)];
        let err = reconcile(&[line("1", 6)], &catalog).unwrap_err();

        match err {
            Error::InsufficientStock {
                product_id,
                requested,
                available,
                ..
            } => {
                assert_eq!(product_id, "1");
                assert_eq!(requested, 6);
                assert_eq!(available, 5);
            },
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_product_fails_with_not_found() {
        let catalog = vec![product(1, 20, 4.0)];
        let err = reconcile(&[line("99", 1)], &catalog).unwrap_err();

        match err {
            Error::NotFound { product_id } => assert_eq!(product_id, "99"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_takes_precedence_over_stock_error() {
        // First line exceeds stock, second line is unknown. The two-pass
        // design reports the unknown id, not the stock violation.
        let catalog = vec![product(1, 20, 4.0)];
        let lines = [line("1", 100), line("99", 1)];
        let err = reconcile(&lines, &catalog).unwrap_err();

        match err {
            Error::NotFound { product_id } => assert_eq!(product_id, "99"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rating_treated_as_out_of_stock() {
        let catalog = vec![product(1, 100, 0.0)];
        let err = reconcile(&[line("1", 1)], &catalog).unwrap_err();

        match err {
            Error::InsufficientStock { available, .. } => assert_eq!(available, 0),
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
    }

    #[test]
    fn test_id_match_is_string_normalized() {
        let catalog = vec![product(42, 50, 1.0)];
        let processed = reconcile(&[line(" 42 ", 3)], &catalog).unwrap();
        assert_eq!(processed[0].id, "42");
    }

    #[test]
    fn test_multiple_lines_all_resolved() {
        let catalog = vec![product(1, 20, 4.0), product(2, 30, 3.0)];
        let processed = reconcile(&[line("1", 5), line("2", 10)], &catalog).unwrap();

        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0].stock_real, 5);
        assert_eq!(processed[1].stock_real, 10);
    }

    #[test]
    fn test_discount_carried_through_untouched() {
        let catalog = vec![product(1, 20, 4.0)];
        let mut item = line("1", 2);
        item.discount = 3.5;
        let processed = reconcile(&[item], &catalog).unwrap();
        assert!((processed[0].discount - 3.5).abs() < f64::EPSILON);
    }
}
