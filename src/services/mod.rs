pub mod navigator;
pub mod ticket_gateway;

pub use navigator::Navigator;
pub use ticket_gateway::TicketGateway;
