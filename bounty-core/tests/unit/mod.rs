mod domain_address_proptest;
mod engine_flows;
