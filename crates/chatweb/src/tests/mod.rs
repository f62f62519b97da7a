mod page_message;
