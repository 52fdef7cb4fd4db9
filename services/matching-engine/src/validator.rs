//! Order validation
//!
//! Turns a raw feed record into a typed order. Nothing here touches a book.

use types::errors::ValidationError;
use types::order::{Order, OrderKind, OrderRequest, Side};

/// Validate kind and side codes, kind first
pub fn validate(request: &OrderRequest) -> Result<Order, ValidationError> {
    Order::try_from(request.clone())
}

/// Predicate form of [`validate`]
pub fn is_valid(request: &OrderRequest) -> bool {
    OrderKind::from_code(request.kind).is_some() && Side::from_code(request.side).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::ids::OrderId;

    #[test]
    fn test_valid_market_request() {
        let request = OrderRequest::new(2, 2, Decimal::new(12345, 2), 7, 11);
        let order = validate(&request).unwrap();
        assert_eq!(order.kind, OrderKind::MARKET);
        assert_eq!(order.side, Side::SELL);
        assert!(is_valid(&request));
    }

    #[test]
    fn test_invalid_codes() {
        let bad_side = OrderRequest::new(1, 0, Decimal::ONE, 1, 1);
        assert_eq!(
            validate(&bad_side),
            Err(ValidationError::UndefinedOrderSide { order_id: OrderId::new(1), code: 0 })
        );
        assert!(!is_valid(&bad_side));

        let bad_kind = OrderRequest::new(3, 1, Decimal::ONE, 1, 2);
        assert!(matches!(validate(&bad_kind), Err(ValidationError::UndefinedOrderType { code: 3, .. })));
        assert!(!is_valid(&bad_kind));
    }
}
