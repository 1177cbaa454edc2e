pub mod queue_server;
