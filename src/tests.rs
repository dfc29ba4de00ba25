#[cfg(test)]
mod integration_tests {
    use crate::handlers::baskets::{BasketResponse, CreateBasketRequest, UpdateBasketRequest};
    use crate::handlers::capital::CapitalResponse;
    use crate::handlers::customers::{CreateCustomerRequest, CustomerResponse};
    use crate::handlers::expenses::{
        CreateExpenseCategoryRequest, CreateExpenseRequest, ExpenseCategoryResponse,
        ExpenseResponse, UpdateExpenseCategoryRequest, UpdateExpenseRequest,
    };
    use crate::handlers::orders::{CreateOrderRequest, OrderResponse, UpdateOrderRequest};
    use crate::handlers::providers::{
        CreateShippingProviderRequest, CreateShippingSourceRequest, ShippingProviderResponse,
        ShippingSourceResponse, UpdateShippingSourceRequest,
    };
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{ApiResponse, OrderMoneyTotals, ProviderLoad};
    use model::entities::order_basket::OrderBasketStatus;
    use rust_decimal::Decimal;

    async fn create_customer(server: &TestServer) -> CustomerResponse {
        let response = server
            .post("/api/v1/customers")
            .json(&CreateCustomerRequest {
                full_name: "Lina Aziz".to_string(),
                phone_number: Some("0911111111".to_string()),
                address: None,
                email: None,
                notes: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ApiResponse<CustomerResponse>>().data
    }

    async fn create_shipping_provider(server: &TestServer) -> ShippingProviderResponse {
        let response = server
            .post("/api/v1/shipping-providers")
            .json(&CreateShippingProviderRequest {
                name: "Desert Cargo".to_string(),
                phone_number: "0922222222".to_string(),
                price_per_kg: Decimal::new(350, 2),
                address: "Istanbul".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ApiResponse<ShippingProviderResponse>>().data
    }

    async fn create_basket(
        server: &TestServer,
        provider_id: i32,
        shipping_charge: Option<Decimal>,
        items_weight: Option<Decimal>,
    ) -> BasketResponse {
        let response = server
            .post("/api/v1/baskets")
            .json(&CreateBasketRequest {
                total_price: Decimal::ZERO,
                total_paid_price: None,
                number_of_items: 0,
                items_link: None,
                items_weight,
                shipping_charge,
                shipped_at: None,
                status: None,
                notes: None,
                shipping_provider_id: provider_id,
                shipping_source_id: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ApiResponse<BasketResponse>>().data
    }

    async fn capital_balance(server: &TestServer) -> Decimal {
        let response = server.get("/api/v1/capital").await;
        response.assert_status(StatusCode::OK);
        response.json::<ApiResponse<CapitalResponse>>().data.amount
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "reachable");
    }

    #[tokio::test]
    async fn test_customer_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let customer = create_customer(&server).await;
        assert_eq!(customer.full_name, "Lina Aziz");
        assert_eq!(customer.points, 0);

        // Listed while live
        let response = server.get("/api/v1/customers").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<CustomerResponse>> = response.json();
        assert_eq!(body.data.len(), 1);

        // Gone after soft delete
        let response = server
            .delete(&format!("/api/v1/customers/{}", customer.id))
            .await;
        response.assert_status(StatusCode::OK);
        let response = server
            .get(&format!("/api/v1/customers/{}", customer.id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expense_lifecycle_reconciles_capital() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/expenses")
            .json(&CreateExpenseRequest {
                name: "Warehouse rent".to_string(),
                amount: Decimal::from(50),
                date: None,
                category_id: None,
                description: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let expense = response.json::<ApiResponse<ExpenseResponse>>().data;
        assert_eq!(capital_balance(&server).await, Decimal::from(-50));

        // Only the delta moves the balance
        let response = server
            .put(&format!("/api/v1/expenses/{}", expense.id))
            .json(&UpdateExpenseRequest {
                amount: Some(Decimal::from(30)),
                ..Default::default()
            })
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(capital_balance(&server).await, Decimal::from(-30));

        // Soft delete reverses the remaining contribution
        let response = server
            .delete(&format!("/api/v1/expenses/{}", expense.id))
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(capital_balance(&server).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_invalid_expense_is_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/expenses")
            .json(&CreateExpenseRequest {
                name: "Bad".to_string(),
                amount: Decimal::ZERO,
                date: None,
                category_id: None,
                description: None,
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(capital_balance(&server).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_order_flow_reconciles_capital_and_completes_basket() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let customer = create_customer(&server).await;
        let provider = create_shipping_provider(&server).await;
        let basket = create_basket(&server, provider.id, Some(Decimal::from(20)), None).await;
        assert_eq!(capital_balance(&server).await, Decimal::from(-20));

        // Unpaid order: only the delivery cost counts
        let response = server
            .post("/api/v1/orders")
            .json(&CreateOrderRequest {
                total_price: Decimal::from(100),
                number_of_items: 2,
                items_link: None,
                delivery_charge: Some(Decimal::from(10)),
                customer_delivery_charge: Some(Decimal::from(5)),
                ordered_at: None,
                has_received_price: None,
                bill_id: None,
                status: None,
                notes: None,
                customer_id: customer.id,
                order_basket_id: basket.id,
                delivery_provider_id: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let order = response.json::<ApiResponse<OrderResponse>>().data;
        assert_eq!(capital_balance(&server).await, Decimal::from(-30));

        // Collecting the price credits it and completes the basket
        let response = server
            .put(&format!("/api/v1/orders/{}", order.id))
            .json(&UpdateOrderRequest {
                has_received_price: Some(true),
                ..Default::default()
            })
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(capital_balance(&server).await, Decimal::from(70));

        let response = server.get(&format!("/api/v1/baskets/{}", basket.id)).await;
        response.assert_status(StatusCode::OK);
        let basket = response.json::<ApiResponse<BasketResponse>>().data;
        assert_eq!(basket.status, OrderBasketStatus::Completed);

        // Nothing missing, delivery charge collected
        let response = server.get("/api/v1/reports/order-money").await;
        response.assert_status(StatusCode::OK);
        let totals = response.json::<ApiResponse<OrderMoneyTotals>>().data;
        assert_eq!(totals.missing_from_providers, Decimal::ZERO);
        assert_eq!(totals.received_delivery_charges, Decimal::from(5));
    }

    #[tokio::test]
    async fn test_missing_order_returns_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/orders/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .put("/api/v1/orders/999")
            .json(&UpdateOrderRequest::default())
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_basket_update_moves_shipping_delta() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let provider = create_shipping_provider(&server).await;
        let basket = create_basket(&server, provider.id, Some(Decimal::from(20)), None).await;

        let response = server
            .put(&format!("/api/v1/baskets/{}", basket.id))
            .json(&UpdateBasketRequest {
                shipping_charge: Some(Decimal::from(35)),
                ..Default::default()
            })
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(capital_balance(&server).await, Decimal::from(-35));
    }

    #[tokio::test]
    async fn test_shipping_provider_load_report() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let provider = create_shipping_provider(&server).await;
        create_basket(&server, provider.id, None, Some(Decimal::from(40))).await;
        create_basket(&server, provider.id, None, Some(Decimal::from(60))).await;

        // Default range covers the last 30 days
        let response = server.get("/api/v1/reports/shipping-provider-load").await;
        response.assert_status(StatusCode::OK);
        let loads = response.json::<ApiResponse<Vec<ProviderLoad>>>().data;
        let load = loads
            .iter()
            .find(|l| l.provider_id == provider.id)
            .expect("provider missing from load report");
        assert_eq!(load.basket_count, 2);
        assert_eq!(load.total_weight, Decimal::from(100));
    }

    #[tokio::test]
    async fn test_expense_category_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/expense-categories")
            .json(&CreateExpenseCategoryRequest {
                name: "Packaging".to_string(),
                description: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let category = response.json::<ApiResponse<ExpenseCategoryResponse>>().data;

        let response = server
            .put(&format!("/api/v1/expense-categories/{}", category.id))
            .json(&UpdateExpenseCategoryRequest {
                description: Some("Boxes and tape".to_string()),
                ..Default::default()
            })
            .await;
        response.assert_status(StatusCode::OK);
        let updated = response.json::<ApiResponse<ExpenseCategoryResponse>>().data;
        assert_eq!(updated.name, "Packaging");
        assert_eq!(updated.description.as_deref(), Some("Boxes and tape"));

        let response = server
            .get(&format!("/api/v1/expense-categories/{}", category.id))
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .delete(&format!("/api/v1/expense-categories/{}", category.id))
            .await;
        response.assert_status(StatusCode::OK);
        let response = server
            .get(&format!("/api/v1/expense-categories/{}", category.id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_shipping_source_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/shipping-sources")
            .json(&CreateShippingSourceRequest {
                name: "Dubai warehouse".to_string(),
                address: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let source = response.json::<ApiResponse<ShippingSourceResponse>>().data;

        let response = server
            .put(&format!("/api/v1/shipping-sources/{}", source.id))
            .json(&UpdateShippingSourceRequest {
                address: Some("Jebel Ali free zone".to_string()),
                ..Default::default()
            })
            .await;
        response.assert_status(StatusCode::OK);
        let updated = response.json::<ApiResponse<ShippingSourceResponse>>().data;
        assert_eq!(updated.name, "Dubai warehouse");
        assert_eq!(updated.address.as_deref(), Some("Jebel Ali free zone"));

        let response = server
            .get(&format!("/api/v1/shipping-sources/{}", source.id))
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .delete(&format!("/api/v1/shipping-sources/{}", source.id))
            .await;
        response.assert_status(StatusCode::OK);
        let response = server
            .get(&format!("/api/v1/shipping-sources/{}", source.id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
