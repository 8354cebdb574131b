mod hash_object;
