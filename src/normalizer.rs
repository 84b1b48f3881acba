use crate::model::{Asin, VariantRecord};
use crate::source::payload::{RawOffer, RawProduct};
use crate::utils::cents_to_dollars;

/// Normalizes one provider product entry. Returns `None` for entries without an ASIN.
///
/// Field defaults: no offers means no prices, missing rating/review series
/// count as 0, missing images give an empty list.
pub fn normalize_product(product: RawProduct) -> Option<VariantRecord> {
    let asin = Asin::new(product.asin()?);

    let offer_prices = current_offer_prices(product.offers.as_deref().unwrap_or_default());
    let lowest_price = offer_prices.iter().min().map(|&cents| cents_to_dollars(cents));

    let rating_history = product.rating_series();
    let review_history = product.review_series();

    Some(VariantRecord {
        asin,
        images: split_images(product.images_csv.as_deref()),
        size: product.size,
        color: product.color,
        offer_count: offer_prices.len(),
        offer_prices,
        lowest_price,
        total_ratings: rating_history.latest().unwrap_or(0),
        total_reviews: review_history.latest().unwrap_or(0),
        monthly_sales: product.monthly_sold,
        rating_history: rating_history.into_vec(),
        review_history: review_history.into_vec(),
    })
}

/// Current price per offer: the element two before the end of its `offerCSV`
/// (the price of the last price/shipping triple).
pub fn current_offer_prices(offers: &[RawOffer]) -> Vec<i64> {
    offers
        .iter()
        .filter_map(|offer| {
            let csv = offer.offer_csv.as_deref()?;
            csv.len().checked_sub(2).map(|idx| csv[idx])
        })
        .collect()
}

fn split_images(csv: Option<&str>) -> Vec<String> {
    csv.filter(|s| !s.is_empty())
        .map(|s| s.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(json: &str) -> RawProduct {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_price_two_before_end() {
        let offers = vec![
            RawOffer { offer_csv: Some(vec![100, 2500, 0, 200, 1999, 499]) },
            RawOffer { offer_csv: Some(vec![300, 2100]) },
            RawOffer { offer_csv: Some(vec![7]) },
            RawOffer { offer_csv: None },
        ];
        assert_eq!(current_offer_prices(&offers), vec![1999, 300]);
    }

    #[test]
    fn normalizes_full_entry() {
        let rec = normalize_product(product(
            r#"{
                "asin": "B000TEST01",
                "imagesCSV": "71abc,81def",
                "size": "M",
                "color": "Red",
                "offers": [
                    { "offerCSV": [100, 2500, 0] },
                    { "offerCSV": [100, 1999, 0] }
                ],
                "reviews": { "ratingCount": [10, 400, 20, 410], "reviewCount": [10, 50] },
                "monthlySold": 200
            }"#,
        ))
        .unwrap();

        assert_eq!(rec.asin, Asin::from("B000TEST01"));
        assert_eq!(rec.images, vec!["71abc", "81def"]);
        assert_eq!(rec.size.as_deref(), Some("M"));
        assert_eq!(rec.color.as_deref(), Some("Red"));
        assert_eq!(rec.offer_prices, vec![2500, 1999]);
        assert_eq!(rec.offer_count, 2);
        assert_eq!(rec.lowest_price.as_deref(), Some("19.99"));
        assert_eq!(rec.total_ratings, 410);
        assert_eq!(rec.total_reviews, 50);
        assert_eq!(rec.monthly_sales, Some(200));
        assert_eq!(rec.rating_history, vec![10, 400, 20, 410]);
    }

    #[test]
    fn empty_offers_have_no_lowest_price() {
        let rec = normalize_product(product(r#"{ "asin": "B000TEST01", "offers": [] }"#)).unwrap();
        assert_eq!(rec.offer_count, 0);
        assert!(rec.offer_prices.is_empty());
        assert_eq!(rec.lowest_price, None);
        assert_eq!(rec.total_ratings, 0);
        assert_eq!(rec.total_reviews, 0);
        assert!(rec.images.is_empty());
        assert_eq!(rec.monthly_sales, None);
    }

    #[test]
    fn skips_entry_without_asin() {
        assert!(normalize_product(product(r#"{ "size": "M" }"#)).is_none());
    }
}
