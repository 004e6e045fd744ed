pub mod dashboard_route;
