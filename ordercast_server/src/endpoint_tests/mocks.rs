use mockall::mock;
use ordercast_engine::{
    db_types::{Admin, NewOrder, Order, OrderStatusType},
    traits::{AdminManagement, AuthApiError, OrderFlowError, OrderManagement},
};

mock! {
    pub OrderDb {}
    impl OrderManagement for OrderDb {
        async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;
        async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderFlowError>;
        async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderFlowError>;
        async fn fetch_orders(&self) -> Result<Vec<Order>, OrderFlowError>;
    }
}

mock! {
    pub AdminDb {}
    impl AdminManagement for AdminDb {
        async fn fetch_admin_by_username(&self, username: &str) -> Result<Option<Admin>, AuthApiError>;
        async fn insert_admin_if_absent(&self, username: &str, password_hash: &str) -> Result<bool, AuthApiError>;
    }
}
