mod test_store_parity;
