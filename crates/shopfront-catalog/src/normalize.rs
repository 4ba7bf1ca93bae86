//! Normalization from raw catalog records to [`shopfront_core::DisplayProduct`].
//!
//! This is the single place aggregate fields (rating, stock, discount) and
//! image fallbacks are computed; view code and the listing controller only
//! ever see the normalized shape. The function is pure: no network, no
//! cache, same input always yields the same output.

use shopfront_core::{ColorOption, DisplayProduct, SizeOption};

use crate::types::RawProduct;

/// Image reference used when a product has neither variant photos nor a
/// top-level image.
const PLACEHOLDER_IMAGE: &str = "placeholder-product.png";

/// Normalizes a raw catalog record into a [`DisplayProduct`].
///
/// Degrades gracefully on missing data rather than failing:
///
/// - Image precedence: first color variant's first photo, then the
///   top-level `imageUrl`, then a fixed placeholder. Each reference is
///   resolved against `image_base` unless already absolute.
/// - Rating: arithmetic mean rounded to one decimal; a product with no
///   ratings gets average `0.0` and count `0`, never a null.
/// - Stock: sum of size-variant quantities; no size variants means `0`.
/// - Discount: the backend's explicit `discountPercent` wins when present;
///   otherwise it is derived from the price pair. A zero or missing price
///   yields `0` (no division by zero).
#[must_use]
pub fn normalize_product(raw: RawProduct, image_base: &str) -> DisplayProduct {
    let image_url = raw
        .color_variants
        .first()
        .and_then(|variant| variant.photos.first())
        .or(raw.image_url.as_ref())
        .map_or_else(
            || resolve_image_ref(PLACEHOLDER_IMAGE, image_base),
            |reference| resolve_image_ref(reference, image_base),
        );

    let (rating_avg, rating_count) = aggregate_rating(&raw);
    let total_stock: i64 = raw.size_variants.iter().map(|s| s.quantity).sum();

    let discount_percent = raw
        .discount_percent
        .unwrap_or_else(|| derive_discount_percent(raw.price, raw.discounted_price));

    let colors = raw
        .color_variants
        .into_iter()
        .map(|variant| ColorOption {
            name: variant.name,
            photos: variant
                .photos
                .iter()
                .map(|photo| resolve_image_ref(photo, image_base))
                .collect(),
        })
        .collect();

    let sizes = raw
        .size_variants
        .into_iter()
        .map(|variant| SizeOption {
            name: variant.name,
            quantity: variant.quantity,
        })
        .collect();

    DisplayProduct {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        brand: raw.brand,
        price: raw.price,
        discounted_price: raw.discounted_price.unwrap_or(raw.price),
        discount_percent,
        image_url,
        rating_avg,
        rating_count,
        total_stock,
        category: raw.category,
        sizes,
        colors,
        created_at: raw.created_at,
    }
}

/// Resolves an image reference to a displayable URL.
///
/// Absolute references (`http`-prefixed) pass through verbatim, so
/// resolving an already-resolved reference is a no-op. Relative references
/// are joined onto `image_base`.
fn resolve_image_ref(reference: &str, image_base: &str) -> String {
    if reference.starts_with("http") {
        return reference.to_owned();
    }
    format!(
        "{}/{}",
        image_base.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}

/// Mean rating rounded to one decimal, clamped to the valid 0–5 range,
/// plus the entry count. Empty ratings yield `(0.0, 0)`.
fn aggregate_rating(raw: &RawProduct) -> (f64, usize) {
    let count = raw.ratings.len();
    if count == 0 {
        return (0.0, 0);
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = raw.ratings.iter().map(|r| r.rating).sum::<f64>() / count as f64;
    let rounded = (mean * 10.0).round() / 10.0;
    (rounded.clamp(0.0, 5.0), count)
}

/// Derives a whole-percent discount from the price pair.
///
/// Used only when the backend did not store `discountPercent` explicitly.
/// Records that violate the `discountedPrice <= price` invariant come out
/// as `0` rather than a negative discount.
fn derive_discount_percent(price: f64, discounted_price: Option<f64>) -> u32 {
    let Some(discounted) = discounted_price else {
        return 0;
    };
    if price <= 0.0 {
        return 0;
    }
    let percent = ((price - discounted) / price * 100.0).round();
    if percent.is_finite() && percent > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            percent as u32
        }
    } else {
        0
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
