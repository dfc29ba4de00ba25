//! This file serves as the root for all SeaORM entity modules.
//! The data models mirror the back-office domain of the forwarding business:
//! customers place orders, orders travel in shipping baskets, expenses are
//! booked against the business, and a single capital row carries the running
//! cash balance.

pub mod capital;
pub mod customer;
pub mod delivery_provider;
pub mod employee;
pub mod expense;
pub mod expense_category;
pub mod order;
pub mod order_basket;
pub mod shipping_provider;
pub mod shipping_source;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::capital::Entity as Capital;
    pub use super::customer::Entity as Customer;
    pub use super::delivery_provider::Entity as DeliveryProvider;
    pub use super::employee::Entity as Employee;
    pub use super::expense::Entity as Expense;
    pub use super::expense_category::Entity as ExpenseCategory;
    pub use super::order::Entity as Order;
    pub use super::order_basket::Entity as OrderBasket;
    pub use super::shipping_provider::Entity as ShippingProvider;
    pub use super::shipping_source::Entity as ShippingSource;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // Create customers
        let customer1 = customer::ActiveModel {
            full_name: Set("Sara Haddad".to_string()),
            phone_number: Set(Some("+961 70 000 001".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let customer2 = customer::ActiveModel {
            full_name: Set("Omar Khalil".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create providers
        let shipping_provider = shipping_provider::ActiveModel {
            name: Set("TransGlobal".to_string()),
            phone_number: Set("+961 1 000 000".to_string()),
            price_per_kg: Set(Decimal::new(350, 2)), // 3.50
            address: Set("Beirut port, hangar 12".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let delivery_provider = delivery_provider::ActiveModel {
            name: Set("CityWheels".to_string()),
            phone_number: Set("+961 3 000 000".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let source = shipping_source::ActiveModel {
            name: Set("Guangzhou warehouse".to_string()),
            address: Set(Some("Baiyun district".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a basket holding the orders
        let basket = order_basket::ActiveModel {
            total_price: Set(Decimal::new(40000, 2)), // 400.00
            number_of_items: Set(12),
            items_weight: Set(Some(Decimal::new(2500, 2))), // 25.00 kg
            shipping_charge: Set(Some(Decimal::new(8000, 2))),
            shipping_provider_id: Set(shipping_provider.id),
            shipping_source_id: Set(Some(source.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create orders in the basket
        let order1 = order::ActiveModel {
            total_price: Set(Decimal::new(15000, 2)),
            number_of_items: Set(3),
            delivery_charge: Set(Some(Decimal::new(500, 2))),
            customer_id: Set(customer1.id),
            order_basket_id: Set(basket.id),
            delivery_provider_id: Set(Some(delivery_provider.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let order2 = order::ActiveModel {
            total_price: Set(Decimal::new(25000, 2)),
            number_of_items: Set(9),
            has_received_price: Set(true),
            customer_id: Set(customer2.id),
            order_basket_id: Set(basket.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an expense with a category
        let category = expense_category::ActiveModel {
            name: Set("Packaging".to_string()),
            description: Set(Some("Boxes, tape, fillers".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let expense = expense::ActiveModel {
            name: Set("Bubble wrap rolls".to_string()),
            amount: Set(Decimal::new(4500, 2)),
            category_id: Set(Some(category.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create an employee
        let employee = employee::ActiveModel {
            full_name: Set("Rami Aoun".to_string()),
            salary: Set(Decimal::new(120000, 2)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The capital singleton can be created at its fixed identity
        let cap = capital::ActiveModel {
            id: Set(capital::SINGLETON_ID),
            amount: Set(Decimal::ZERO),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        assert_eq!(cap.id, capital::SINGLETON_ID);
        assert_eq!(cap.amount, Decimal::ZERO);

        // Read back and verify data
        let customers = Customer::find().all(&db).await?;
        assert_eq!(customers.len(), 2);
        assert!(customers.iter().any(|c| c.full_name == "Sara Haddad"));
        assert!(customers.iter().all(|c| c.points == 0));

        let orders = Order::find().all(&db).await?;
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().any(|o| o.id == order1.id));
        assert_eq!(
            orders.iter().filter(|o| o.has_received_price).count(),
            1
        );

        // Default enum values
        assert_eq!(order1.status, order::OrderStatus::Pending);
        assert_eq!(basket.status, order_basket::OrderBasketStatus::Shipping);

        // Orders of the basket via the Related impl
        let basket_orders = basket.find_related(Order).all(&db).await?;
        assert_eq!(basket_orders.len(), 2);

        // Orders of a single customer
        let customer1_orders = Order::find()
            .filter(order::Column::CustomerId.eq(customer1.id))
            .all(&db)
            .await?;
        assert_eq!(customer1_orders.len(), 1);
        assert_eq!(customer1_orders[0].id, order1.id);

        // Expense carries its category
        let found_expense = Expense::find_by_id(expense.id).one(&db).await?.unwrap();
        assert_eq!(found_expense.category_id, Some(category.id));
        let related_category = found_expense
            .find_related(ExpenseCategory)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(related_category.name, "Packaging");

        // Soft-delete column starts empty everywhere
        assert!(found_expense.deleted_at.is_none());
        assert!(employee.deleted_at.is_none());
        assert!(order2.deleted_at.is_none());

        Ok(())
    }
}
