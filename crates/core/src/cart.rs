//! Cart pages and line items

use rusty_money::{Money, iso::Currency};

use crate::{
    ids::{ColorId, LineItemId, ProductId, SizeId},
    pagination::Pagination,
};

/// Smallest quantity a line item may hold.
pub const MIN_QUANTITY: u32 = 1;

/// One row in the cart: a product variant and its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    /// Line id, stable across pages.
    pub line_item_id: LineItemId,

    /// Product in this line.
    pub product_id: ProductId,

    /// Display name of the product.
    pub product_name: String,

    /// Price of one unit.
    pub unit_price: Money<'static, Currency>,

    /// Units in the cart, never below [`MIN_QUANTITY`].
    pub quantity: u32,

    /// Color variant, if the backend named one.
    pub color_id: Option<ColorId>,

    /// Color variant display name.
    pub color_name: Option<String>,

    /// Size variant, if the backend named one.
    pub size_id: Option<SizeId>,

    /// Size variant display name.
    pub size_name: Option<String>,

    /// Product category display name.
    pub category_name: Option<String>,

    /// Product image location.
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Quantity after applying `delta`, or `None` if it would drop below
    /// [`MIN_QUANTITY`] or overflow.
    pub fn quantity_after(&self, delta: i32) -> Option<u32> {
        self.quantity
            .checked_add_signed(delta)
            .filter(|quantity| *quantity >= MIN_QUANTITY)
    }
}

/// A page of cart content, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPage {
    /// Lines on this page, in backend order.
    pub items: Vec<CartLineItem>,

    /// Position of this page within the whole cart.
    pub pagination: Pagination,

    /// Subtotal reported by the backend for this page at fetch time.
    pub subtotal: Money<'static, Currency>,
}

impl CartPage {
    /// An empty first page.
    pub fn empty(size: u32, currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination {
                page: 0,
                size,
                total_elements: 0,
                total_pages: 0,
            },
            subtotal: Money::from_minor(0, currency),
        }
    }

    /// Find an item on this page.
    pub fn item(&self, id: LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.line_item_id == id)
    }

    /// Find an item on this page for mutation.
    pub fn item_mut(&mut self, id: LineItemId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.line_item_id == id)
    }

    /// Remove an item from this page, returning it if it was present.
    pub fn remove(&mut self, id: LineItemId) -> Option<CartLineItem> {
        let index = self.items.iter().position(|item| item.line_item_id == id)?;

        Some(self.items.remove(index))
    }

    /// Ids of the items on this page.
    pub fn ids(&self) -> impl Iterator<Item = LineItemId> + '_ {
        self.items.iter().map(|item| item.line_item_id)
    }

    /// Whether this page shows no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rusty_money::{Money, iso::PHP};

    use crate::{
        ids::{LineItemId, ProductId},
        pagination::{Pagination, page_count},
    };

    use super::{CartLineItem, CartPage};

    pub(crate) fn line_item(id: u64, price_minor: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            line_item_id: LineItemId::new(id),
            product_id: ProductId::new(100 + id),
            product_name: format!("Product {id}"),
            unit_price: Money::from_minor(price_minor, PHP),
            quantity,
            color_id: None,
            color_name: Some("Black".to_string()),
            size_id: None,
            size_name: Some("M".to_string()),
            category_name: Some("Shirts".to_string()),
            image_url: None,
        }
    }

    pub(crate) fn page(page: u32, total_elements: u64, items: Vec<CartLineItem>) -> CartPage {
        CartPage {
            items,
            pagination: Pagination {
                page,
                size: 2,
                total_elements,
                total_pages: page_count(total_elements, 2),
            },
            subtotal: Money::from_minor(0, PHP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};

    #[test]
    fn quantity_after_respects_minimum() {
        let item = line_item(1, 10_00, 1);

        assert_eq!(item.quantity_after(-1), None);
        assert_eq!(item.quantity_after(0), Some(1));
        assert_eq!(item.quantity_after(2), Some(3));
    }

    #[test]
    fn quantity_after_rejects_overflow() {
        let item = line_item(1, 10_00, u32::MAX);

        assert_eq!(item.quantity_after(1), None);
    }

    #[test]
    fn remove_returns_removed_item() {
        let mut page = page(0, 2, vec![line_item(1, 100, 1), line_item(2, 200, 1)]);

        let removed = page.remove(LineItemId::new(1));

        assert_eq!(removed.map(|item| item.line_item_id), Some(LineItemId::new(1)));
        assert_eq!(page.ids().collect::<Vec<_>>(), vec![LineItemId::new(2)]);
        assert_eq!(page.remove(LineItemId::new(1)), None);
    }
}
