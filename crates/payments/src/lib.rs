pub mod asaas_client;
