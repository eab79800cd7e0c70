//! Source files written into the generated apps

/// Port every server variant listens on
pub const API_PORT: u16 = 3000;

/// URL the generated clients fetch
pub const MESSAGE_URL: &str = "http://localhost:3000/api/message";

pub const REACT_APP: &str = r#"import { useEffect, useState } from 'react';
import './App.css';

function App() {
  const [message, setMessage] = useState('');

  useEffect(() => {
    fetch('http://localhost:3000/api/message')
      .then(res => res.json())
      .then(data => setMessage(data.message));
  }, []);

  return (
    <div className="App">
      <h1>{message}</h1>
    </div>
  );
}

export default App;
"#;

pub const VUE_APP: &str = r#"<template>
  <div>
    <h1>{{ message }}</h1>
  </div>
</template>

<script setup>
import { ref, onMounted } from 'vue';
const message = ref('');

onMounted(async () => {
  const res = await fetch('http://localhost:3000/api/message');
  const data = await res.json();
  message.value = data.message;
});
</script>
"#;

pub const ANGULAR_COMPONENT: &str = r#"import { Component, OnInit } from '@angular/core';
import { HttpClient } from '@angular/common/http';

@Component({
  selector: 'app-root',
  templateUrl: './app.component.html',
})
export class AppComponent implements OnInit {
  message = '';

  constructor(private http: HttpClient) {}

  ngOnInit(): void {
    this.http.get<{ message: string }>('http://localhost:3000/api/message')
      .subscribe(data => this.message = data.message);
  }
}
"#;

pub const ANGULAR_TEMPLATE: &str = "<h1>{{ message }}</h1>\n";

pub const ANGULAR_CONFIG: &str = r#"import { provideHttpClient } from '@angular/common/http';
import { ApplicationConfig, provideZoneChangeDetection } from '@angular/core';
import { provideRouter } from '@angular/router';

import { routes } from './app.routes';

export const appConfig: ApplicationConfig = {
  providers: [
    provideZoneChangeDetection({ eventCoalescing: true }),
    provideRouter(routes),
    provideHttpClient(),
  ],
};
"#;

pub const EXPRESS_ENTRY: &str = r#"const express = require('express');
const cors = require('cors');
const app = express();
app.use(cors());
app.get('/api/message', (req, res) => res.json({ message: 'Hello from Express!' }));
app.listen(3000, () => console.log('Server running on http://localhost:3000'));
"#;

pub const KOA_ENTRY: &str = r#"const Koa = require('koa');
const cors = require('@koa/cors');
const app = new Koa();
app.use(cors());
app.use(ctx => {
  if (ctx.method === 'GET' && ctx.path === '/api/message') {
    ctx.body = { message: 'Hello from Koa!' };
  }
});
app.listen(3000, () => console.log('Server running on http://localhost:3000'));
"#;

pub const NEST_CONTROLLER: &str = r#"import { Controller, Get } from '@nestjs/common';
import { AppService } from './app.service';

@Controller()
export class AppController {
  constructor(private readonly appService: AppService) {}

  @Get()
  getHello(): string {
    return this.appService.getHello();
  }

  @Get('api/message')
  getMessage() {
    return { message: 'Hello from NestJS!' };
  }
}
"#;

/// Matches the generated `NestFactory.create(...)` line in main.ts
pub const NEST_CREATE_ANCHOR: &str = r"const app = await NestFactory\.create\([^)]+\);";

pub const NEST_ENABLE_CORS: &str = "app.enableCors()";

pub const NEST_CORS_INSERTION: &str = "\n  app.enableCors();";
