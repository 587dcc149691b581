//! JSON shapes exchanged with the cart backend.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use storefront::{
    cart::{CartLineItem, CartPage},
    gateway::CartItemUpdate,
    ids::{ColorId, LineItemId, ProductId, SizeId, UserId},
    pagination::Pagination,
    pricing::{TotalsError, money_from_decimal},
};

/// Cart Page Response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartPageResponse {
    pub items: Vec<CartItemResponse>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,

    /// Subtotal of the page as computed by the backend
    #[serde(default)]
    pub subtotal: Decimal,
}

/// Cart Item Response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    #[serde(alias = "lineItemId")]
    pub id: LineItemId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(alias = "unitPrice")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub color_id: Option<ColorId>,
    #[serde(default)]
    pub color_name: Option<String>,
    #[serde(default)]
    pub size_id: Option<SizeId>,
    #[serde(default)]
    pub size_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartPageResponse {
    /// Convert into a cart page priced in `currency`.
    pub(crate) fn into_page(self, currency: &'static Currency) -> Result<CartPage, TotalsError> {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_line_item(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CartPage {
            items,
            pagination: Pagination {
                page: self.page_number,
                size: self.page_size,
                total_elements: self.total_elements,
                total_pages: self.total_pages,
            },
            subtotal: money_from_decimal(self.subtotal, currency)?,
        })
    }
}

impl CartItemResponse {
    fn into_line_item(self, currency: &'static Currency) -> Result<CartLineItem, TotalsError> {
        Ok(CartLineItem {
            line_item_id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            unit_price: money_from_decimal(self.price, currency)?,
            quantity: self.quantity,
            color_id: self.color_id,
            color_name: self.color_name,
            size_id: self.size_id,
            size_name: self.size_name,
            category_name: self.category_name,
            image_url: self.image_url,
        })
    }
}

/// Cart Item Request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub color_id: ColorId,
    pub size_id: SizeId,
}

impl From<CartItemUpdate> for CartItemRequest {
    fn from(update: CartItemUpdate) -> Self {
        Self {
            user_id: update.user_id,
            product_id: update.product_id,
            quantity: update.quantity,
            color_id: update.color_id,
            size_id: update.size_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::PHP};
    use testresult::TestResult;

    use super::*;

    const PAGE: &str = r#"{
        "items": [
            {
                "id": 11,
                "productId": 5,
                "productName": "Linen Shirt",
                "price": 499.50,
                "quantity": 2,
                "colorId": 3,
                "colorName": "Sand",
                "sizeName": "L",
                "categoryName": "Shirts",
                "imageUrl": "https://cdn.shop.test/linen.jpg"
            },
            {
                "lineItemId": 12,
                "productId": 6,
                "productName": "Canvas Tote",
                "unitPrice": "150",
                "quantity": 1
            }
        ],
        "pageNumber": 1,
        "pageSize": 2,
        "totalElements": 4,
        "totalPages": 2,
        "subtotal": 1149.00
    }"#;

    #[test]
    fn page_response_converts_to_cart_page() -> TestResult {
        let response: CartPageResponse = serde_json::from_str(PAGE)?;
        let page = response.into_page(PHP)?;

        assert_eq!(page.len(), 2);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_elements, 4);
        assert_eq!(page.subtotal, Money::from_minor(1149_00, PHP));

        let shirt = page.item(LineItemId::new(11)).ok_or("shirt missing")?;

        assert_eq!(shirt.unit_price, Money::from_minor(499_50, PHP));
        assert_eq!(shirt.color_id, Some(ColorId::new(3)));
        assert_eq!(shirt.size_id, None);
        assert_eq!(shirt.size_name.as_deref(), Some("L"));

        let tote = page.item(LineItemId::new(12)).ok_or("tote missing")?;

        assert_eq!(tote.unit_price, Money::from_minor(150_00, PHP));
        assert_eq!(tote.category_name, None);

        Ok(())
    }

    #[test]
    fn missing_subtotal_defaults_to_zero() -> TestResult {
        let response: CartPageResponse = serde_json::from_str(
            r#"{"items":[],"pageNumber":0,"pageSize":5,"totalElements":0,"totalPages":0}"#,
        )?;

        assert_eq!(response.into_page(PHP)?.subtotal, Money::from_minor(0, PHP));

        Ok(())
    }

    #[test]
    fn update_request_uses_camel_case() -> TestResult {
        let request = CartItemRequest::from(CartItemUpdate {
            user_id: UserId::new(1),
            product_id: ProductId::new(5),
            quantity: 3,
            color_id: ColorId::new(2),
            size_id: SizeId::new(4),
        });

        assert_eq!(
            serde_json::to_value(&request)?,
            serde_json::json!({
                "userId": 1,
                "productId": 5,
                "quantity": 3,
                "colorId": 2,
                "sizeId": 4
            })
        );

        Ok(())
    }
}
