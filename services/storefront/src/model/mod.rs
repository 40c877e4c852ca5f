mod html_form;
mod order;
mod session;

pub use html_form::{decode_html_entities, HtmlFormModel};
pub use order::{
    map_pay_status, map_payment_method, parse_create_time, OrderModel, PayStatusModel,
    PaymentMethodModel,
};
pub use session::SessionContext;
